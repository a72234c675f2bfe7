use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "bookdex",
    version,
    about = "book catalog shaping and report tool",
    long_about = "Bookdex fetches a flat list of book-file records, groups them by title, and renders a searchable, sortable table of download and view links.\n\nExamples:\n  bookdex -u https://example.org/books.json\n  bookdex -i ./books.json -q quran -s title --desc\n  bookdex -u https://example.org/books.json -o catalog.html\n\nTip: Use --config to persist settings and keep CLI invocations short."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "vb",
        visible_alias = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        short = 'c',
        long = "clr",
        visible_alias = "color",
        help_heading = "Output",
        help = "Enable colored output (overrides --no-color)."
    )]
    pub color: bool,

    #[arg(
        long = "nc",
        visible_alias = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'u',
        long = "u",
        visible_alias = "url",
        value_name = "URL",
        help_heading = "Input",
        help = "URL of the hosted catalog JSON."
    )]
    pub url: Option<String>,

    #[arg(
        short = 'i',
        long = "if",
        visible_alias = "input-file",
        value_name = "FILE",
        help_heading = "Input",
        help = "Load the catalog JSON from a local file."
    )]
    pub input_file: Option<String>,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.bookdex/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "init-config",
        help_heading = "Input",
        help = "Write a commented default config file if none exists, then exit."
    )]
    pub init_config: bool,

    #[arg(
        short = 'q',
        long = "q",
        visible_alias = "query",
        value_name = "QUERY",
        help_heading = "Display",
        help = "Keep only titles containing this case-insensitive substring."
    )]
    pub query: Option<String>,

    #[arg(
        short = 's',
        long = "st",
        visible_alias = "sort",
        value_name = "COLUMN",
        help_heading = "Display",
        help = "Sort column: no or title."
    )]
    pub sort: Option<String>,

    #[arg(
        short = 'd',
        long = "dsc",
        visible_alias = "desc",
        help_heading = "Display",
        help = "Sort in descending order."
    )]
    pub descending: bool,

    #[arg(
        short = 'F',
        long = "fmt",
        visible_alias = "format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output format: text, json, or html (inferred from -o extension if omitted)."
    )]
    pub format: Option<String>,

    #[arg(
        short = 'o',
        long = "out",
        visible_alias = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write the rendered catalog to a file instead of stdout."
    )]
    pub output: Option<String>,

    #[arg(
        long = "dlb",
        visible_alias = "download-base",
        value_name = "URL",
        help_heading = "Links",
        help = "Base URL joined with each remote file id."
    )]
    pub download_base: Option<String>,

    #[arg(
        long = "cvd",
        visible_alias = "cover-dir",
        value_name = "DIR",
        help_heading = "Links",
        help = "Folder joined with each local cover filename."
    )]
    pub cover_dir: Option<String>,

    #[arg(
        short = 't',
        long = "to",
        visible_alias = "timeout",
        value_name = "SECONDS",
        help_heading = "HTTP",
        help = "Request timeout in seconds."
    )]
    pub timeout: Option<usize>,

    #[arg(
        short = 'p',
        long = "px",
        visible_alias = "proxy",
        value_name = "URL",
        help_heading = "HTTP",
        help = "Route the catalog fetch through a proxy."
    )]
    pub proxy: Option<String>,
}
