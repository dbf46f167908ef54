use clap::Parser;
use dispatch_dns_domain::{CliOverrides, TransportMode};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{Name, RecordType};
use std::str::FromStr;
use tracing::debug;

mod bootstrap;
mod di;

#[derive(Parser)]
#[command(name = "dispatch-dns")]
#[command(version)]
#[command(about = "Dispatch DNS - race a query across upstream nameservers")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Transport mode (udp, tcp, http)
    #[arg(short = 'm', long)]
    mode: Option<TransportMode>,

    /// Upstream nameserver, repeatable (host or host#port)
    #[arg(short = 's', long = "server", value_name = "ADDR")]
    servers: Vec<String>,

    /// Per-attempt timeout in seconds
    #[arg(short = 't', long)]
    timeout: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Name to resolve
    name: String,

    /// Record type
    #[arg(default_value = "A")]
    record_type: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        transport: cli.mode,
        servers: (!cli.servers.is_empty()).then(|| cli.servers.clone()),
        timeout: cli.timeout,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), overrides)?;
    bootstrap::init_logging(&config);

    let query = build_query(&cli.name, &cli.record_type, fastrand::u16(..))?;
    let lookup = di::build_lookup(&config);

    debug!(id = query.id(), name = %cli.name, "Dispatching query");
    let response = lookup.execute(config.resolv.transport, &query).await?;

    print_response(&response);
    Ok(())
}

fn build_query(name: &str, record_type: &str, id: u16) -> anyhow::Result<Message> {
    let fqdn = if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{}.", name)
    };
    let name = Name::from_str(&fqdn)
        .map_err(|e| anyhow::anyhow!("Invalid domain name {}: {}", fqdn, e))?;
    let record_type = RecordType::from_str(&record_type.to_ascii_uppercase())
        .map_err(|e| anyhow::anyhow!("Invalid record type {}: {}", record_type, e))?;

    let mut message = Message::new();
    message
        .set_id(id)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true)
        .add_query(Query::query(name, record_type));
    Ok(message)
}

fn print_response(response: &Message) {
    println!(
        ";; status: {}, id: {}, answers: {}",
        response.response_code(),
        response.id(),
        response.answer_count()
    );
    for record in response.answers() {
        println!("{}", record);
    }
}
