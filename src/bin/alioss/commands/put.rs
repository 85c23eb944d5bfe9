// Put command implementation

use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::PutArgs;
use crate::format::format_bytes;
use alioss::Client;

/// Pick the object id: explicit --id, otherwise generated from --prefix and the file extension
fn resolve_object_id(args: &PutArgs, client: &Client) -> String {
    if let Some(id) = &args.id {
        return id.clone();
    }

    let suffix = Path::new(&args.file)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");
    client.generate_object_id(args.prefix.as_deref().unwrap_or(""), suffix)
}

/// Execute the put command
pub async fn execute_put(args: &PutArgs, client: &Client) -> Result<()> {
    let file = tokio::fs::File::open(&args.file)
        .await
        .with_context(|| format!("Failed to open {}", args.file))?;
    let size = file.metadata().await?.len();

    let object_id = resolve_object_id(args, client);
    client
        .put_object(&args.bucket, &object_id, Box::new(file))
        .await
        .with_context(|| format!("Failed to upload {} to {}", args.file, object_id))?;

    eprintln!("Uploaded {} ({})", args.file, format_bytes(size));
    println!("{}", object_id);
    Ok(())
}
