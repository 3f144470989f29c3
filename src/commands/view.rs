/// `view` command: load the selected samples and report them.
use std::io;

use crate::cli::output::write_view;
use crate::cli::{OutputCtx, OutputFormat, ViewArgs};
use crate::measure::{DataLayout, QueryIndex, ViewerError};
use crate::report::{RenderOptions, Reporter};
use crate::types::ViewOutput;

/// Run the viewer for the parsed arguments.
///
/// # Errors
///
/// Returns `ViewerError` when the reference file or a sample file is missing or
/// malformed, or when stdout cannot be written.
pub fn run(args: &ViewArgs, ctx: &OutputCtx) -> Result<(), ViewerError> {
    let target = args.target();

    let t_queries = ctx.timer("load_query_index");
    let queries = QueryIndex::load(&args.query_ref)?;
    drop(t_queries);

    let layout = DataLayout::new(&args.data_dir);
    let opts = RenderOptions {
        width: args.render_width(),
        truncate: args.truncate,
    };
    let reporter = Reporter::new(&target, &queries, opts)?;

    if ctx.format == OutputFormat::Text {
        // Samples are loaded one at a time so earlier ones stay on screen when
        // a later one fails.
        let stdout = io::stdout();
        let mut out = stdout.lock();
        return reporter.render(&mut out, |sample| {
            let _t = ctx.timer("load_sample");
            layout.load_sample(&target, sample)
        });
    }

    let t_load = ctx.timer("load_selection");
    let loaded = layout.load_selection(&target)?;
    drop(t_load);

    let view = ViewOutput::new(
        &target,
        reporter.query(),
        reporter.reference_query(),
        &loaded,
    );
    write_view(&view, ctx)
}
