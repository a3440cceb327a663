use json_record::files::{message, write_json_file, WRITER_OUTPUT};
use json_record::JsonOptions;
use tracing_subscriber::fmt::SubscriberBuilder;

fn main() -> json_record::Result<()> {
    let _ = SubscriberBuilder::default()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .try_init();

    let options = JsonOptions::pretty().with_ensure_ascii(false);
    write_json_file(WRITER_OUTPUT, &message(), &options)
}
