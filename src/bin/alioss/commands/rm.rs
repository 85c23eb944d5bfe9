// Remove command implementation

use anyhow::Result;
use std::io::{self, Write};

use crate::cli::RmArgs;
use alioss::Client;

/// Execute the rm command
pub async fn execute_rm(args: &RmArgs, client: &Client) -> Result<()> {
    if !args.force {
        print!("Delete {} from bucket {}? [y/N] ", args.id, args.bucket);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    client.delete_object(&args.bucket, &args.id).await?;
    println!("Deleted {}", args.id);
    Ok(())
}
