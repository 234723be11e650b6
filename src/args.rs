use clap::Parser;

/// Flattens board game XML records into one tabular row per game.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing the sources and the output of the dump.
    /// Paths inside it are relative to the directory of the file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, repeatable) An XML file with one or more game records. Setting this option
    /// replaces the sources that may be listed in the --config file.
    #[clap(short, long, value_parser)]
    pub input: Option<Vec<String>>,

    /// (file path, 'stdout' or empty) Where to write the rows. When empty, a timestamped file
    /// name is generated in the current directory.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (default csv) The export format: csv, tsv or json.
    #[clap(long, value_parser)]
    pub format: Option<String>,

    /// (file path) A reference export. If provided, the produced export must match it exactly.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (number) Only process the first N games found in the sources.
    #[clap(long, value_parser)]
    pub limit: Option<usize>,

    /// If passed as an argument, the header row is not written to csv and tsv exports.
    #[clap(long, takes_value = false)]
    pub no_headers: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
