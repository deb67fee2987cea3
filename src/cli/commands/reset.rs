//! Reset command - Delete the saved model

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    adapters::FileStore,
    app::{App, container::DEFAULT_STORE_DIR},
};

#[derive(Parser, Debug)]
#[command(about = "Delete the saved model")]
pub struct ResetArgs {
    /// Directory holding the saved model
    #[arg(long, default_value = DEFAULT_STORE_DIR)]
    pub store_dir: PathBuf,
}

pub fn execute(args: ResetArgs) -> Result<()> {
    let app = App::builder()
        .with_store(FileStore::new(&args.store_dir))
        .build();
    if app.has_model()? {
        app.remove_model()?;
        println!("Model removed from {}", args.store_dir.display());
    } else {
        println!("No model stored in {}", args.store_dir.display());
    }
    Ok(())
}
