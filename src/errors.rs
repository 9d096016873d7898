error_chain! {
    types {
        Error, ErrorKind, ResultExt, Result;
    }

    foreign_links {
        Io(::std::io::Error);
    }

    errors {
        EndWithoutStart(identity: String) {
            description("test end reported without a matching start")
            display("test '{}' ended but was never started", identity)
        }
        OverlappingStart(identity: String) {
            description("test started while another start is still in progress")
            display("test '{}' started while a prior start is unfinished", identity)
        }
        ProgramEndRepeated {
            description("program end reported more than once")
            display("program end reported more than once")
        }
        EventOutsideProgram(event: String) {
            description("test event outside the program start/end window")
            display("'{}' received outside the program start/end window", event)
        }
        ReporterAborted {
            description("reporter aborted by an earlier contract violation")
            display("reporter aborted by an earlier contract violation")
        }
        ClockUnavailable(cause: String) {
            description("monotonic clock reading failed")
            display("monotonic clock reading failed: {}", cause)
        }
    }
}
