// Generate command implementation

use anyhow::Result;

use crate::cli::GenArgs;

/// Execute the gen command
pub fn execute_gen(args: &GenArgs) -> Result<()> {
    println!("{}", alioss::generate_object_id(&args.prefix, &args.suffix));
    Ok(())
}
