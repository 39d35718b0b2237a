//! The `info` subcommand for the addrspace binary

use super::{AddrspaceSubcommandDispatcher, ImageArgs};
use addrspace_memory::{AddressSpace, Summary};
use anyhow::Result;
use clap::Args;
use serde::Serialize;

/// Command line arguments for `addrspace info`
#[derive(Args, Debug)]
#[command(author, version, about)]
pub(crate) struct InfoArgs {
    #[command(flatten)]
    images: ImageArgs,

    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InfoReport {
    entry: Option<String>,
    #[serde(flatten)]
    summary: Summary,
}

impl AddrspaceSubcommandDispatcher for InfoArgs {
    fn dispatch(self) -> Result<()> {
        let (space, entry) = self.images.load()?;
        let report =
            InfoReport { entry: entry.map(|e| format!("{:#010x}", e)), summary: space.summary() };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        if let Some(ref entry) = report.entry {
            println!("entry:    {}", entry);
        }
        println!("live:     {} bytes ({})", report.summary.live_bytes, report.summary.usage);
        if let Some((low, high)) = space.data().bounds() {
            println!("extent:   [{:#010x}, {:#010x}]", low, high);
        }
        println!("segments: {}", report.summary.segments.len());
        for segment in &report.summary.segments {
            println!(
                "  {:#010x}  {:>8} bytes  {}",
                segment.start,
                segment.bytes,
                segment.name.as_deref().unwrap_or("<unnamed>")
            );
        }
        Ok(())
    }
}
