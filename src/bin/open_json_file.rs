use json_record::files::{open_json_file, write_if_truthy, READER_INPUT};
use tracing_subscriber::fmt::SubscriberBuilder;

fn main() -> json_record::Result<()> {
    let _ = SubscriberBuilder::default()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .try_init();

    let path = std::env::args().nth(1).unwrap_or_else(|| READER_INPUT.into());
    if let Some(value) = open_json_file(&path)? {
        write_if_truthy(&mut std::io::stdout().lock(), &value)?;
    }
    Ok(())
}
