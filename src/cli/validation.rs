use crate::cli::args::CliArgs;
use crate::output::OutputFormat;
use crate::view::SortColumn;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(raw) = args.sort.as_deref() {
        if SortColumn::parse(raw).is_none() {
            return Err(format!("invalid --sort '{raw}', expected no or title"));
        }
    }
    if let Some(raw) = args.format.as_deref() {
        if OutputFormat::parse(raw).is_none() {
            return Err(format!(
                "invalid --format '{raw}', expected text, json, or html"
            ));
        }
    }
    if let Some(timeout) = args.timeout {
        if timeout == 0 {
            return Err("invalid timeout, expected positive integer".to_string());
        }
    }
    Ok(())
}
