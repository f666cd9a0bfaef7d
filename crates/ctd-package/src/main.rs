use std::path::PathBuf;

use argh::FromArgs;
use colored::Colorize;
use ctd_package::{
    create_delivery_for_packages, get_packages_in_directory, partition_standard_format,
    statistics_for_packages, DeliveryMetadata, Error, STATISTICS_SUFFIXES, TEMP_DIRECTORY,
};

#[derive(FromArgs)]
/// Inspect a directory of CTD packages or create a data delivery from it.
struct Args {
    /// source root directory holding the packages
    #[argh(positional)]
    root: PathBuf,

    /// directory the delivery is written to; only statistics are printed without it
    #[argh(option, short = 'o')]
    output: Option<PathBuf>,

    /// replace files that already exist in the output directory
    #[argh(switch)]
    overwrite: bool,

    /// monitoring program
    #[argh(option)]
    program: Option<String>,

    /// description of the delivery
    #[argh(option)]
    description: Option<String>,

    /// contact person
    #[argh(option)]
    contact: Option<String>,

    /// free-text comment
    #[argh(option)]
    comment: Option<String>,
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let args: Args = argh::from_env();

    let packages = get_packages_in_directory(&args.root, Some(TEMP_DIRECTORY))?;
    if packages.is_empty() {
        eprintln!(
            "{} {}",
            "No packages found in".yellow(),
            args.root.display()
        );
        return Ok(());
    }

    let (packages, missing) = partition_standard_format(packages);
    for key in &missing {
        eprintln!(
            "{} {} {}",
            "Package".dimmed(),
            key.dimmed(),
            "has no standard format file, skipping".dimmed()
        );
    }

    if let Some(statistics) = statistics_for_packages(&packages) {
        println!("{} packages", packages.len().to_string().green());
        for suffix in STATISTICS_SUFFIXES {
            println!("  {suffix:<14} {}", statistics.count(suffix));
        }
    }

    let Some(output) = args.output else {
        return Ok(());
    };

    let metadata = DeliveryMetadata::from_fields(
        args.program.as_deref().unwrap_or_default(),
        args.description.as_deref().unwrap_or_default(),
        args.contact.as_deref().unwrap_or_default(),
        args.comment.as_deref().unwrap_or_default(),
    );
    let note = create_delivery_for_packages(&packages, &output, args.overwrite, &metadata)?;
    println!("+ {} {}", "Delivery note".green(), note.display());
    Ok(())
}
