use sdk_diagnostics::{AdvancedLogging, LoggingConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = LoggingConfig::production().file_directory("logs");
    let logging = AdvancedLogging::from_config(config);

    let dir = logging.file_directory().ok_or("no file directory")?;
    if dir.is_fallback() {
        println!("'logs' not found, writing to {}", dir.path().display());
    }

    let _guard = sdk_diagnostics::init(&logging)?;

    // Simulate request/response traffic
    for i in 0..10 {
        logging.log(&format!("GET /v3/company/1/query?page={i} 200"));
        std::thread::sleep(std::time::Duration::from_millis(100));
    }

    Ok(())
}
