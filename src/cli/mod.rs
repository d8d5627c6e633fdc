use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{Map, Value};

use crate::client::AdminClient;
use crate::service::Collection;

#[derive(Parser)]
#[command(name = "portfolio")]
#[command(about = "Portfolio CLI - admin client for the portfolio API")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        help = "Base URL of the portfolio API server (default: PORTFOLIO_SERVER env or http://localhost:3000)"
    )]
    pub server: Option<String>,

    #[arg(
        long,
        global = true,
        help = "Session token from a prior login (default: PORTFOLIO_TOKEN env)"
    )]
    pub token: Option<String>,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CollectionArg {
    Projects,
    Experience,
}

impl From<CollectionArg> for Collection {
    fn from(arg: CollectionArg) -> Self {
        match arg {
            CollectionArg::Projects => Collection::Projects,
            CollectionArg::Experience => Collection::Experience,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Login and print the session token")]
    Login {
        #[arg(help = "Admin password")]
        password: String,
    },

    #[command(about = "List a collection")]
    List {
        #[arg(value_enum)]
        collection: CollectionArg,
    },

    #[command(about = "Create an item from a JSON object of fields")]
    Create {
        #[arg(value_enum)]
        collection: CollectionArg,
        #[arg(help = "Item fields as a JSON object, e.g. '{\"title\":\"New\"}'")]
        fields: String,
    },

    #[command(about = "Update an item by id with a JSON object of fields")]
    Update {
        #[arg(value_enum)]
        collection: CollectionArg,
        id: i64,
        #[arg(help = "Fields to merge as a JSON object")]
        fields: String,
    },

    #[command(about = "Delete an item by id")]
    Delete {
        #[arg(value_enum)]
        collection: CollectionArg,
        id: i64,
    },
}

fn parse_fields(raw: &str) -> anyhow::Result<Map<String, Value>> {
    match serde_json::from_str(raw)? {
        Value::Object(map) => Ok(map),
        _ => anyhow::bail!("fields must be a JSON object"),
    }
}

fn print_items(items: &[Value], json: bool) {
    if json {
        println!("{}", serde_json::to_string_pretty(items).unwrap_or_default());
        return;
    }
    for item in items {
        let id = item.get("id").map(Value::to_string).unwrap_or_default();
        let label = item
            .get("title")
            .or_else(|| item.get("company"))
            .and_then(Value::as_str)
            .unwrap_or("(untitled)");
        println!("{id}\t{label}");
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let server = cli
        .server
        .clone()
        .or_else(|| std::env::var("PORTFOLIO_SERVER").ok())
        .unwrap_or_else(|| "http://localhost:3000".to_string());
    let token = cli
        .token
        .clone()
        .or_else(|| std::env::var("PORTFOLIO_TOKEN").ok());

    let mut client = match token {
        Some(token) => AdminClient::with_token(&server, token),
        None => AdminClient::new(&server),
    };

    match cli.command {
        Commands::Login { password } => {
            client.login(&password).await?;
            let token = client.token().unwrap_or_default();
            if cli.json {
                println!("{}", serde_json::json!({ "token": token }));
            } else {
                println!("Logged in. Export for later commands:");
                println!("  export PORTFOLIO_TOKEN={token}");
            }
            Ok(())
        }
        Commands::List { collection } => {
            let items = client.fetch_collection(collection.into()).await?;
            print_items(&items, cli.json);
            Ok(())
        }
        Commands::Create { collection, fields } => {
            let fields = parse_fields(&fields)?;
            let items = client.create(collection.into(), &fields).await?;
            print_items(&items, cli.json);
            Ok(())
        }
        Commands::Update {
            collection,
            id,
            fields,
        } => {
            let fields = parse_fields(&fields)?;
            let items = client.update(collection.into(), id, &fields).await?;
            print_items(&items, cli.json);
            Ok(())
        }
        Commands::Delete { collection, id } => {
            let items = client.delete(collection.into(), id).await?;
            print_items(&items, cli.json);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_fields_requires_an_object() {
        assert!(parse_fields("{\"title\":\"x\"}").is_ok());
        assert!(parse_fields("[1,2]").is_err());
        assert!(parse_fields("not json").is_err());
    }
}
