fn main() -> Result<(), Box<dyn std::error::Error>> {
    quicksearch_cli::run()
}
