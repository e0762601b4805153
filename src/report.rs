/// Observer for pipeline diagnostics.
///
/// The pipeline stages report progress and failures through this trait
/// instead of printing directly, so tests can capture what a run would have
/// said without scraping stdout.
pub trait Reporter: Sync {
    fn progress(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
}

/// Production reporter: progress to stdout, problems to stderr.
pub struct Console;

impl Reporter for Console {
    fn progress(&self, message: &str) {
        println!("{}", message);
    }

    fn warning(&self, message: &str) {
        eprintln!("Warning: {}", message);
    }

    fn error(&self, message: &str) {
        eprintln!("Error: {}", message);
    }
}
