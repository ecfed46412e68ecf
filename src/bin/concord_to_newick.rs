use cftools::cli::{RelabelArgs, handle_error_and_exit, init_verbose, parse_or_usage, usage_and_exit};
use cftools::commands::relabel;
use cftools::error::Result;

fn runner() -> Result<()> {
    let args: RelabelArgs = parse_or_usage();
    let Some(tree_file) = args.tree_file.as_deref() else {
        usage_and_exit::<RelabelArgs>();
    };

    init_verbose(args.verbosity);
    log::info!(
        "Running {}-{} [concord_to_newick]",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    relabel::concord_to_newick(tree_file, &args.output_prefix)?;
    log::info!("concord_to_newick end");
    Ok(())
}

fn main() {
    if let Err(e) = runner() {
        handle_error_and_exit(e);
    }
}
