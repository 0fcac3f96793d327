use clap::Parser;
use paramscan_model::ViewKind;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "paramscan")]
#[command(about = "Find IFC elements by parameter and select or isolate them", long_about = None)]
pub struct Cli {
    /// IFC (STEP) file to scan
    #[arg(required = true)]
    pub file: PathBuf,

    /// Parameter name to look for (case-insensitive)
    #[arg(short, long, required_unless_present = "interactive")]
    pub name: Option<String>,

    /// Substring the parameter value must contain (case-insensitive)
    #[arg(long, default_value = "")]
    pub value: String,

    /// Isolate the matches instead of selecting them
    #[arg(short, long)]
    pub isolate: bool,

    /// Active view kind reported by the document (e.g. floor-plan, 3d, section)
    #[arg(long)]
    pub view: Option<ViewKind>,

    /// Configuration file layered over the defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print selection and isolation state as JSON on stdout
    #[arg(long, conflicts_with = "interactive")]
    pub json: bool,

    /// Open the ribbon and the scanner dialog as terminal menus
    #[arg(long)]
    pub interactive: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn name_is_required_outside_interactive_mode() {
        assert!(Cli::try_parse_from(["paramscan", "house.ifc"]).is_err());
        assert!(Cli::try_parse_from(["paramscan", "house.ifc", "--interactive"]).is_ok());
    }

    #[test]
    fn view_kind_parses() {
        let cli =
            Cli::try_parse_from(["paramscan", "house.ifc", "-n", "Mark", "--view", "Section"])
                .unwrap();
        assert_eq!(cli.view, Some(ViewKind::Section));
        assert_eq!(cli.value, "");
        assert!(Cli::try_parse_from(["paramscan", "house.ifc", "-n", "Mark", "--view", "roof"])
            .is_err());
    }
}
