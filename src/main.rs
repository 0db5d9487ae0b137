use std::path::PathBuf;

use ansi_term::Style;
use color_eyre::eyre::{eyre, Result};
use structopt::StructOpt;

use gwidi::colors::{CYAN, RED, WHITE};
use gwidi::formatting::{self, StyleType};
use gwidi::pitch::{self, NoteLabel};
use gwidi::song::DEFAULT_TEMPO;
use gwidi::{ImportOptions, Song, SLOTS_PER_MEASURE};

#[derive(Debug, StructOpt)]
enum GwidiCommand {
    #[structopt(name = "info", about = "Summarize the grid a MIDI file quantizes to.")]
    Info {
        #[structopt(flatten)]
        import: ImportArgs,
    },

    #[structopt(name = "roll", about = "Print a track as a sixteenth-note piano roll.")]
    Roll {
        #[structopt(flatten)]
        import: ImportArgs,

        #[structopt(short = "t", long = "track", help = "Track number.", default_value = "0")]
        track: usize,
    },

    #[structopt(name = "lane", about = "Print the timeline of one pitch bucket.")]
    Lane {
        #[structopt(flatten)]
        import: ImportArgs,

        #[structopt(short = "t", long = "track", help = "Track number.", default_value = "0")]
        track: usize,

        #[structopt(
            short = "o",
            long = "octave",
            help = "Octave number, -1 to 9.",
            allow_hyphen_values = true
        )]
        octave: i8,

        #[structopt(short = "n", long = "note", help = "Note bucket: C1, D, E, F, G, A, B or C2.")]
        note: NoteLabel,
    },

    #[structopt(name = "chord", about = "Print every bucket sounding at one sixteenth.")]
    Chord {
        #[structopt(flatten)]
        import: ImportArgs,

        #[structopt(short = "t", long = "track", help = "Track number.", default_value = "0")]
        track: usize,

        #[structopt(short = "s", long = "slot", help = "Absolute sixteenth-note position.")]
        slot: usize,
    },

    #[structopt(name = "ref", about = "View reference tables used by the importer.")]
    Ref {
        #[structopt(subcommand)]
        subcommand: RefCommand,
    },
}

#[derive(Debug, StructOpt)]
struct ImportArgs {
    #[structopt(help = "Standard MIDI file to import.", parse(from_os_str))]
    input: PathBuf,

    #[structopt(
        long = "default-tempo",
        help = "Tempo in BPM used when the file has no tempo event. Defaults to the MIDI standard tempo."
    )]
    default_tempo: Option<f64>,

    #[structopt(
        long = "max-measures",
        help = "Refuse files whose notes reach past this many measures."
    )]
    max_measures: Option<usize>,
}

#[derive(Debug, StructOpt)]
enum RefCommand {
    #[structopt(name = "notes", about = "View how MIDI keys fold into note buckets.")]
    Notes,

    #[structopt(name = "instruments", about = "View the program numbers for GM instruments.")]
    Instruments,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let command = GwidiCommand::from_args();

    if let Err(err) = run_command(command) {
        eprintln!("{}", err);
        log(*RED, "error:", "Command failed.");
        std::process::exit(1)
    }

    Ok(())
}

fn log(color: Style, prefix: &str, message: &str) {
    eprintln!("{} {}", color.paint(prefix), WHITE.paint(message));
}

fn style_type() -> StyleType {
    if cfg!(feature = "color") {
        StyleType::AnsiTerm
    } else {
        StyleType::Normal
    }
}

fn run_command(command: GwidiCommand) -> Result<()> {
    match command {
        GwidiCommand::Info { import } => {
            let song = import_song(&import)?;

            println!("tempo:    {} bpm", song.tempo());
            println!("measures: {}", song.measure_count());
            println!("tracks:   {}", song.track_count());

            for track in song.tracks() {
                let notes = (0..song.measure_count() * SLOTS_PER_MEASURE)
                    .flat_map(|position| song.slots_at_instant(track.number(), position))
                    .filter(|vertical| vertical.slot == gwidi::Slot::Onset)
                    .count();

                println!(
                    "  track {:>2}: {} (channel {}), {} onsets",
                    track.number(),
                    track.instrument().unwrap_or("no program"),
                    track
                        .channel()
                        .map(|channel| channel.to_string())
                        .unwrap_or_else(|| "-".to_owned()),
                    notes,
                );
            }

            Ok(())
        }

        GwidiCommand::Roll { import, track } => {
            let song = import_song(&import)?;
            let track = song
                .track(track)
                .ok_or_else(|| eyre!("Track {} has no notes.", track))?;

            print!("{}", formatting::render_track(track, &style_type())?);
            Ok(())
        }

        GwidiCommand::Lane {
            import,
            track,
            octave,
            note,
        } => {
            let song = import_song(&import)?;
            let slots = song.slots_for_pitch(track, octave, note);

            if slots.is_empty() {
                return Err(eyre!(
                    "Nothing to show for track {} octave {} note {}.",
                    track,
                    octave,
                    note
                ));
            }

            let style_type = style_type();
            let mut line = String::new();
            for (position, slot) in slots.iter().enumerate() {
                if position % SLOTS_PER_MEASURE == 0 {
                    line.push('|');
                }
                formatting::MultiFormat::multi_fmt(slot, &mut line, &style_type)?;
            }
            println!("{}|", line);

            Ok(())
        }

        GwidiCommand::Chord {
            import,
            track,
            slot,
        } => {
            let song = import_song(&import)?;
            let snapshot = song.slots_at_instant(track, slot);

            if snapshot.is_empty() {
                return Err(eyre!("Slot {} is past the end of track {}.", slot, track));
            }

            print!("{}", formatting::render_chord(&snapshot, &style_type())?);
            Ok(())
        }

        GwidiCommand::Ref { subcommand } => {
            match subcommand {
                RefCommand::Notes => {
                    for key in 0..12 {
                        let bucket = pitch::quantize(key)?;
                        println!("pitch class {:>2} -> {}", key, bucket.label);
                    }
                    println!("octave = key / 12 - 1");
                }

                RefCommand::Instruments => {
                    for (program, name) in gwidi::instruments::GM_PROGRAMS.iter().enumerate() {
                        println!("{:>3} {}", program, name);
                    }
                }
            }

            Ok(())
        }
    }
}

fn import_song(args: &ImportArgs) -> Result<Song> {
    log(*CYAN, "Importing", &args.input.display().to_string());

    let song = gwidi::import_file(&args.input, &import_options(args))?;

    Ok(song)
}

fn import_options(args: &ImportArgs) -> ImportOptions {
    let defaults = ImportOptions::default();

    ImportOptions {
        default_tempo: args.default_tempo.unwrap_or(DEFAULT_TEMPO),
        max_measures: args.max_measures.unwrap_or(defaults.max_measures),
    }
}
