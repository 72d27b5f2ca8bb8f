error_chain! {
    foreign_links {
        Io(::std::io::Error);
    }

    errors {
        FetchFailure(reason: String) {
            description("The rendered page could not be fetched.")
            display("The rendered page could not be fetched: {}.", reason)
        }

        ExtractionError(table_id: String) {
            description("A required results table is missing from the document.")
            display("The results table \"{}\" is missing from the document.", table_id)
        }

        MalformedCell(detail: String) {
            description("A table cell's internal structure does not match the expected shape.")
            display("A table cell's internal structure does not match the expected \
                     shape: {}.", detail)
        }

        Storage(destination: String) {
            description("A persistence write failed.")
            display("The persistence write to \"{}\" failed.", destination)
        }
    }
}
