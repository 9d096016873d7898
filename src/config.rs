/// Construction-time options for a `Reporter`.
#[derive(Clone, Debug)]
pub struct Config
{
    /// The suite name printed in the banner at program start.
    pub suite_name: String,
    /// Average-duration threshold above which the summary suggests
    /// optimization.
    pub slow_test_threshold_ms: u64,
    /// If set, contract violations (such as a test end with no matching
    /// start) abort the run instead of being tolerated.
    pub strict_ordering: bool,
    /// Configuration facts echoed verbatim under the banner, one per line.
    pub banner_lines: Vec<String>,
}

impl Config
{
    pub fn add_banner_line<S>(&mut self, line: S) where S: Into<String> {
        self.banner_lines.push(line.into())
    }
}

impl Default for Config
{
    fn default() -> Self {
        Config {
            suite_name: "test suite".to_owned(),
            slow_test_threshold_ms: 100,
            strict_ordering: false,
            banner_lines: Vec::new(),
        }
    }
}
