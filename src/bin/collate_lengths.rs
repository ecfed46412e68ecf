use cftools::cli::{CollateArgs, handle_error_and_exit, init_verbose, parse_or_usage, usage_and_exit};
use cftools::commands::collate;
use cftools::error::Result;
use std::path::Path;

fn runner() -> Result<()> {
    let args: CollateArgs = parse_or_usage();
    if args.len_files.is_empty() {
        usage_and_exit::<CollateArgs>();
    }

    init_verbose(args.verbosity);
    log::info!(
        "Running {}-{} [collate_lengths]",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    collate::collate_lengths(&args.len_files, Path::new(&args.out_file))?;
    log::info!("collate_lengths end");
    Ok(())
}

fn main() {
    if let Err(e) = runner() {
        handle_error_and_exit(e);
    }
}
