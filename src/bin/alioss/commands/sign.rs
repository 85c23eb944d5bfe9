// Sign command implementation

use anyhow::Result;

use crate::cli::SignArgs;
use alioss::{Client, SignOptions};

/// Execute the sign command
pub async fn execute_sign(args: &SignArgs, client: &Client) -> Result<()> {
    let mut options = SignOptions::new();
    if let Some(expire) = args.expire {
        options = options.with_expire_seconds(expire);
    }

    let url = client.get_signed_url(&args.bucket, &args.id, &options).await?;
    println!("{}", url);
    Ok(())
}
