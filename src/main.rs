use anyhow::Result;
use tracing_subscriber::EnvFilter;

use snmp_open::collector::SnmpCollector;
use snmp_open::config::AppConfig;
use snmp_open::formatter::JsonFormatter;
use snmp_open::snmp::{FileReader, SnmpOpen};

#[tokio::main]
async fn main() -> Result<()> {
    // stdout занят JSON, логи идут в stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("snmp_open=warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = AppConfig::load(AppConfig::profile_path())?;
    config.debug_config();

    let result = match AppConfig::fixtures_dir() {
        Some(dir) => {
            tracing::info!("Читаем сохраненный вывод из {}", dir);
            let snmp = SnmpOpen::new(FileReader::new(dir).with_warnings(true));
            SnmpCollector::collect_all(&snmp, &config).await?
        }
        None => {
            let snmp = SnmpOpen::new(config.command_reader());
            SnmpCollector::collect_all(&snmp, &config).await?
        }
    };

    match JsonFormatter::to_json_string(&result) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::error!("Ошибка JSON сериализации: {}", e),
    }

    Ok(())
}
