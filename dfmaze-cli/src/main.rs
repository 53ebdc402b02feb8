use std::{io, path::PathBuf};

use clap::Parser;
use dfmaze::Dims;
use dfmaze_cli::{
    app::{self, clamp_dimension, CliError, RunOptions},
    logging,
    renderer::RenderStyle,
    settings::Settings,
};

#[derive(Parser, Debug)]
#[clap(version, author, about, name = "dfmaze")]
struct Args {
    #[clap(short = 'W', long, allow_negative_numbers = true, help = "Maze width in cells")]
    width: Option<i64>,
    #[clap(short = 'H', long, allow_negative_numbers = true, help = "Maze height in cells")]
    height: Option<i64>,
    #[clap(short, long, help = "Seed for reproducible mazes")]
    seed: Option<u64>,
    #[clap(long, value_enum, help = "Drawing style")]
    style: Option<RenderStyle>,
    #[clap(short, long, action, help = "Also show the maze before solving it")]
    unsolved: bool,
    #[clap(long, action, help = "Don't solve the maze")]
    no_solve: bool,
    #[clap(long, action, help = "Highlight the solution path")]
    color: bool,
    #[clap(long, action, help = "Print the maze as JSON instead of drawing it")]
    json: bool,
    #[clap(long, value_name = "FILE", help = "Save the final maze as JSON")]
    save: Option<PathBuf>,
    #[clap(
        long,
        value_name = "FILE",
        conflicts_with_all = ["width", "height", "seed"],
        help = "Solve a maze saved with --save instead of generating one"
    )]
    load: Option<PathBuf>,
    #[clap(
        short,
        long,
        action,
        conflicts_with_all = ["json", "unsolved", "no_solve"],
        help = "Walk through the maze with the arrow keys, --save sets the save file"
    )]
    play: bool,
    #[clap(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "More logging, repeat for even more"
    )]
    verbose: u8,
    #[clap(short, long, action, help = "Only log errors")]
    quiet: bool,
    #[clap(long, action, help = "Reset config to default and quit")]
    reset_config: bool,
    #[clap(long, action, help = "Show config path and quit")]
    show_config_path: bool,
}

impl Args {
    fn into_options(self, settings: &Settings) -> RunOptions {
        let mut options = RunOptions::from_settings(settings);

        if let Some(width) = self.width {
            options.size = Dims(clamp_dimension("width", width), options.size.1);
        }
        if let Some(height) = self.height {
            options.size = Dims(options.size.0, clamp_dimension("height", height));
        }
        if let Some(style) = self.style {
            options.style = style;
        }

        options.seed = self.seed;
        options.show_unsolved |= self.unsolved;
        options.show_solved &= !self.no_solve;
        options.color |= self.color;
        options.json = self.json;
        options.load = self.load;
        options.save = self.save;
        options.play = self.play;

        options
    }
}

fn main() -> Result<(), CliError> {
    let args = Args::parse();
    logging::init(logging::level_from_verbosity(args.verbose, args.quiet));

    let settings_path = Settings::default_path();

    if args.reset_config {
        Settings::reset_config(&settings_path)?;
        return Ok(());
    }

    if args.show_config_path {
        if let Some(s) = settings_path.to_str() {
            println!("{}", s);
        } else {
            println!("{:?}", settings_path);
        }
        return Ok(());
    }

    better_panic::install();

    let settings = Settings::load(&settings_path)?;
    let options = args.into_options(&settings);
    log::debug!("Running with {:?}", options);

    if options.play {
        app::play(&options, &mut io::stdout())?;
    } else {
        app::run(&options, &mut io::stdout().lock())?;
    }

    Ok(())
}
