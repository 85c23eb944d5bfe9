// List command implementation

use anyhow::Result;

use crate::cli::LsArgs;
use crate::format::{format_bytes, format_timestamp};
use alioss::Client;

/// Execute the ls command
pub async fn execute_ls(args: &LsArgs, client: &Client) -> Result<()> {
    let result = client.list_objects(&args.bucket).await?;

    let mut total_size: u64 = 0;
    for obj in &result.objects {
        total_size += obj.size;

        if args.long {
            // Long format: timestamp size key
            let timestamp = format_timestamp(&obj.last_modified);
            let size_str = if args.human_readable {
                format!("{:>10}", format_bytes(obj.size))
            } else {
                format!("{:>12}", obj.size)
            };
            println!("{} {} {}", timestamp, size_str, obj.key);
        } else {
            println!("{}", obj.key);
        }
    }

    if args.long {
        println!();
        println!(
            "Total: {} objects, {}",
            result.objects.len(),
            format_bytes(total_size)
        );
    }

    // Only one page is fetched
    if result.is_truncated {
        eprintln!(
            "Listing truncated, next marker: {}",
            result.next_marker.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}
