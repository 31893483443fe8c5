//! Admin password hashing for the configuration file.

use clap::Args;

use atelier_auth::PasswordHasher;
use atelier_core::error::AppError;

use crate::output;

/// Arguments for the hash-password command
#[derive(Debug, Args)]
pub struct HashPasswordArgs {
    /// Password to hash
    pub password: String,
}

/// Execute the hash-password command
pub fn execute(args: &HashPasswordArgs) -> Result<(), AppError> {
    let hash = PasswordHasher::new().hash_password(&args.password)?;
    println!("{hash}");
    output::print_success("Set this value as auth.admin_password_hash");
    Ok(())
}
