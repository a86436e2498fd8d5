use std::collections::BTreeMap;

use tornado_analyze::Dimension;
use tornado_analyze::DimensionCollection;
use tornado_analyze::Measure;
use tornado_analyze::NestedValue;
use tracing::info;

use crate::cli::PivotArgs;
use crate::config::Config;
use crate::error::CliError;
use crate::generate::to_json;
use crate::generate::write_output;
use crate::request::ChartRequest;

pub(crate) fn pivot(args: PivotArgs, config: &Config) -> Result<(), CliError> {
    let request = ChartRequest::read(&args.input)?;

    info!(
        input = %args.input.display(),
        order = ?args.order,
        invert = args.invert,
        "pivoting data set"
    );

    let pivoted = pivot_request(&request, &args.order, args.invert)?;
    let json = to_json(&pivoted, args.pretty || config.pretty)?;

    write_output(None, &json)
}

/// Pivots the primary data set into `order`, or into the request's own
/// dimension order if `order` is empty.
pub(crate) fn pivot_request(
    request: &ChartRequest,
    order: &[String],
    invert: bool,
) -> Result<BTreeMap<Measure, NestedValue>, CliError> {
    let primary = request.primary()?;

    let target: DimensionCollection = if order.is_empty() {
        primary.dimensions().clone()
    } else {
        order
            .iter()
            .map(|target| {
                primary
                    .dimensions()
                    .find(target)
                    .cloned()
                    .unwrap_or_else(|| Dimension::new(target.as_str()))
            })
            .collect()
    };

    Ok(primary.pivot(&target, invert)?.simple())
}
