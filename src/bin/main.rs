//! Treatwire CLI - batch token transfers from the command line
//!
//!   treatwire identity --mnemonic "<words>" [--show-secret]
//!   treatwire send --mnemonic "<words>" --tasks <file>
//!                  [--relay <url>] [--recipient <npub>] [--out <dir>]
//!
//! Task file format: one transfer per line, `address-token-amount`,
//! token in {SATS, TREAT, TRICK, NOSTR, TNA} (case-insensitive).
//!
//! Output format:
//!   --pretty   Pretty-print JSON (default for tty)

use serde_json::{json, Value};
use std::env;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use treatwire::logging::init_logging;
use treatwire::transfer::receipt;
use treatwire::{parse_tasks, Identity, RelayClient, SessionConfig, TransferPipeline};

fn main() {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let opts = ParsedArgs::parse(&args[1..]);

    if opts.help {
        print_usage();
        return;
    }

    if opts.version {
        println!("treatwire 0.1.0");
        return;
    }

    let result = match opts.command.as_deref() {
        Some("identity") => cmd_identity(&opts),
        Some("send") => cmd_send(&opts),
        Some(cmd) => Err(format!("Unknown command: {}", cmd)),
        None => {
            print_usage();
            return;
        }
    };

    match result {
        Ok(output) => {
            let formatted = if opts.pretty || std::io::stdout().is_terminal() {
                serde_json::to_string_pretty(&output).unwrap()
            } else {
                serde_json::to_string(&output).unwrap()
            };
            println!("{}", formatted);
        }
        Err(e) => {
            let err = json!({"error": e});
            if opts.pretty || std::io::stdout().is_terminal() {
                eprintln!("{}", serde_json::to_string_pretty(&err).unwrap());
            } else {
                eprintln!("{}", serde_json::to_string(&err).unwrap());
            }
            std::process::exit(1);
        }
    }
}

fn cmd_identity(opts: &ParsedArgs) -> Result<Value, String> {
    let mnemonic = opts.mnemonic.as_deref().ok_or("identity requires --mnemonic")?;
    let identity = Identity::from_mnemonic(mnemonic).map_err(|e| e.to_string())?;

    let mut output = json!({
        "npub": identity.npub,
        "pubkey": identity.pubkey_hex,
    });
    if opts.show_secret {
        output["nsec"] = json!(identity.nsec);
    }
    Ok(output)
}

fn cmd_send(opts: &ParsedArgs) -> Result<Value, String> {
    let mnemonic = opts.mnemonic.as_deref().ok_or("send requires --mnemonic")?;
    let tasks_path = opts.tasks.as_deref().ok_or("send requires --tasks <file>")?;

    let identity = Identity::from_mnemonic(mnemonic).map_err(|e| e.to_string())?;
    tracing::info!(npub = %identity.npub, "identity loaded");

    let text = std::fs::read_to_string(tasks_path)
        .map_err(|e| format!("read {}: {}", tasks_path, e))?;
    let tasks = parse_tasks(&text).map_err(|e| e.to_string())?;

    let mut config = SessionConfig::default();
    if let Some(relay) = &opts.relay {
        config = config.with_relay(relay.clone());
    }
    if let Some(recipient) = &opts.recipient {
        config = config.with_recipient(recipient.clone());
    }
    let recipient = config.recipient_key().map_err(|e| e.to_string())?;

    let rt = tokio::runtime::Runtime::new().map_err(|e| e.to_string())?;
    let receipts = rt
        .block_on(async {
            let session = RelayClient::new(config.relay_url.clone());
            let mut pipeline = TransferPipeline::new(Arc::new(identity), recipient, session);
            pipeline.run(&tasks).await
        })
        .map_err(|e| e.to_string())?;

    let out_dir = opts.out.clone().unwrap_or_else(|| PathBuf::from("."));
    let path = receipt::write_receipts(&out_dir, &receipts).map_err(|e| e.to_string())?;

    let published = receipts.iter().filter(|r| r.event_id.is_some()).count();
    Ok(json!({
        "tasks": receipts.len(),
        "published": published,
        "failed": receipts.len() - published,
        "receipts": path.display().to_string(),
    }))
}

#[derive(Default)]
struct ParsedArgs {
    command: Option<String>,
    mnemonic: Option<String>,
    tasks: Option<String>,
    relay: Option<String>,
    recipient: Option<String>,
    out: Option<PathBuf>,
    show_secret: bool,
    pretty: bool,
    help: bool,
    version: bool,
}

impl ParsedArgs {
    fn parse(args: &[String]) -> Self {
        let mut opts = ParsedArgs::default();
        let mut positional = Vec::new();
        let mut i = 0;

        while i < args.len() {
            let arg = &args[i];
            match arg.as_str() {
                "--help" | "-h" => opts.help = true,
                "--version" | "-V" => opts.version = true,
                "--pretty" => opts.pretty = true,
                "--show-secret" => opts.show_secret = true,
                "--mnemonic" | "-m" => {
                    if i + 1 < args.len() {
                        opts.mnemonic = Some(args[i + 1].clone());
                        i += 1;
                    }
                }
                "--tasks" | "-t" => {
                    if i + 1 < args.len() {
                        opts.tasks = Some(args[i + 1].clone());
                        i += 1;
                    }
                }
                "--relay" | "-r" => {
                    if i + 1 < args.len() {
                        opts.relay = Some(args[i + 1].clone());
                        i += 1;
                    }
                }
                "--recipient" => {
                    if i + 1 < args.len() {
                        opts.recipient = Some(args[i + 1].clone());
                        i += 1;
                    }
                }
                "--out" | "-o" => {
                    if i + 1 < args.len() {
                        opts.out = Some(PathBuf::from(&args[i + 1]));
                        i += 1;
                    }
                }
                _ if !arg.starts_with('-') => positional.push(arg.clone()),
                _ => {} // Ignore unknown flags
            }
            i += 1;
        }

        if !positional.is_empty() {
            opts.command = Some(positional.remove(0));
        }

        opts
    }
}

fn print_usage() {
    println!(
        r#"treatwire - batch token transfers over a Nostr relay

USAGE:
    treatwire identity --mnemonic "<words>" [--show-secret]
    treatwire send --mnemonic "<words>" --tasks <file>
                   [--relay <url>] [--recipient <npub>] [--out <dir>]

OPTIONS:
    -m, --mnemonic <words>    BIP-39 phrase the signing identity derives from
    -t, --tasks <file>        Task file, one `address-token-amount` per line
    -r, --relay <url>         Relay endpoint (default: {relay})
        --recipient <key>     Treasury npub/hex receiving the transfers
    -o, --out <dir>           Directory for receipts.json (default: .)
        --show-secret         Print the nsec with `identity`
        --pretty              Pretty-print JSON output
    -h, --help                Show this help
    -V, --version             Show version"#,
        relay = treatwire::DEFAULT_RELAY_URL
    );
}
