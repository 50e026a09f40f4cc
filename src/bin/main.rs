use std::io::{BufRead, Write};
use std::net::Ipv4Addr;

use bgpkit_wire::models::BgpMessage;
use bgpkit_wire::parser::parse_bgp_message;
use bgpkit_wire::ProtocolError;
use clap::Parser;
use log::{debug, info};
use serde_json::json;

/// bgpkit-wire is a simple cli tool that decodes hex-encoded BGP messages.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Opts {
    /// Hex-encoded BGP messages including the 19-byte header. Reads one message per line from
    /// stdin when none is given.
    #[clap(name = "HEX")]
    messages: Vec<String>,

    /// Output as JSON objects
    #[clap(long)]
    json: bool,

    /// Pretty-print JSON output
    #[clap(long)]
    pretty: bool,

    #[clap(flatten)]
    session: Session,
}

/// Session parameters used to validate decoded OPEN messages. Validation runs when all three are
/// given.
#[derive(Parser, Debug)]
struct Session {
    /// Local BGP identifier
    #[clap(long)]
    local_id: Option<Ipv4Addr>,

    /// Local AS number
    #[clap(long)]
    local_asn: Option<u32>,

    /// Expected AS number of the peer
    #[clap(long)]
    remote_asn: Option<u32>,
}

impl Session {
    fn params(&self) -> Option<(Ipv4Addr, u32, u32)> {
        Some((self.local_id?, self.local_asn?, self.remote_asn?))
    }
}

enum Outcome {
    Accepted(BgpMessage),
    Rejected(Option<BgpMessage>, ProtocolError),
}

fn process(line: &str, session: &Session) -> Result<Outcome, hex::FromHexError> {
    let raw = hex::decode(line.trim())?;
    debug!("decoding {} bytes", raw.len());
    let msg = match parse_bgp_message(raw.into()) {
        Ok(msg) => msg,
        Err(e) => return Ok(Outcome::Rejected(None, e)),
    };
    if let (BgpMessage::Open(open), Some((local_id, local_asn, remote_asn))) =
        (&msg, session.params())
    {
        if let Err(e) = open.validate(local_id, local_asn, remote_asn) {
            return Ok(Outcome::Rejected(Some(msg), e));
        }
        info!("OPEN from AS{} accepted", open.peer_asn());
    }
    Ok(Outcome::Accepted(msg))
}

fn format_outcome(outcome: &Outcome, opts: &Opts) -> String {
    if opts.json {
        let val = match outcome {
            Outcome::Accepted(msg) => json!({ "message": msg }),
            Outcome::Rejected(msg, e) => json!({
                "message": msg,
                "error": e.notification.error_type().to_string(),
                "notification": e.to_transmit(),
            }),
        };
        return match opts.pretty {
            true => serde_json::to_string_pretty(&val).unwrap_or_else(|_| val.to_string()),
            false => val.to_string(),
        };
    }

    match outcome {
        Outcome::Accepted(msg) => format!("{:?}", msg),
        Outcome::Rejected(msg, e) => {
            let mut out = String::new();
            if let Some(msg) = msg {
                out.push_str(&format!("{:?}\n", msg));
            }
            out.push_str(&e.to_string());
            if let Some(notification) = e.to_transmit() {
                match BgpMessage::Notification(notification.clone()).encode() {
                    Ok(bytes) => out.push_str(&format!("\nreply: {}", hex::encode(bytes))),
                    Err(err) => out.push_str(&format!("\ncannot encode reply: {}", err)),
                }
            }
            out
        }
    }
}

fn main() {
    let opts: Opts = Opts::parse();

    env_logger::init();

    let lines: Vec<String> = match opts.messages.is_empty() {
        false => opts.messages.clone(),
        true => std::io::stdin()
            .lock()
            .lines()
            .map_while(Result::ok)
            .filter(|l| !l.trim().is_empty())
            .collect(),
    };

    let mut stdout = std::io::stdout();
    let mut failed = false;
    for line in &lines {
        let output_str = match process(line, &opts.session) {
            Ok(outcome) => {
                failed |= matches!(outcome, Outcome::Rejected(..));
                format_outcome(&outcome, &opts)
            }
            Err(e) => {
                eprintln!("invalid hex input: {}", e);
                failed = true;
                continue;
            }
        };
        if let Err(e) = writeln!(stdout, "{}", &output_str) {
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                eprintln!("{}", e);
            }
            std::process::exit(1);
        }
    }

    if failed {
        std::process::exit(1);
    }
}
