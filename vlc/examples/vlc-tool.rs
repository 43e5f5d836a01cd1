// SPDX-FileCopyrightText: 2026 Contributors to the vlc-rs project.
// SPDX-License-Identifier: Apache-2.0

//! Small command line front end over the bindings.
//!
//! ```text
//! cargo run --example vlc-tool -- info
//! cargo run --example vlc-tool -- play file:///tmp/clip.mkv --seconds 5
//! cargo run --example vlc-tool -- broadcast file:///tmp/clip.mkv \
//!     --output '#std{access=http,mux=ts,dst=:8080}' --seconds 30
//! ```

mod common;

use std::{path::PathBuf, thread, time::Duration};

use clap::{Parser, Subcommand};
use tracing::info;
use vlc::{
    BroadcastConfig, VlcInstance, VlmEventKind,
    config::{InstanceConfig, get_libvlc_path},
    load_api,
};

#[derive(Debug, Parser)]
#[command(version, about = "Inspect libvlc, play media or run a VLM broadcast", long_about = None)]
struct Opts {
    /// Path to the libvlc shared library. Defaults to LIBVLC_PATH or the platform name.
    #[arg(long, env = "LIBVLC_PATH")]
    libvlc: Option<PathBuf>,

    /// JSON instance configuration (arguments, interfaces, identity).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print version information and the available filters.
    Info,

    /// Play a media location for a while.
    Play {
        /// Media location, e.g. file:///tmp/clip.mkv
        #[arg(value_name = "MRL")]
        mrl: String,

        /// How long to play, in seconds.
        #[arg(long, default_value_t = 10)]
        seconds: u64,
    },

    /// Stream an input through VLM and log its events.
    Broadcast {
        /// Input location.
        #[arg(value_name = "MRL")]
        input: String,

        /// Stream output chain.
        #[arg(long)]
        output: String,

        /// VLM media name.
        #[arg(long, default_value = "channel1")]
        name: String,

        #[arg(long = "loop")]
        looping: bool,

        /// How long to broadcast, in seconds.
        #[arg(long, default_value_t = 30)]
        seconds: u64,
    },
}

fn main() -> Result<(), vlc::Error> {
    common::setup_logging();
    let opts = Opts::parse();

    let api = load_api(opts.libvlc.clone().unwrap_or_else(get_libvlc_path))?;
    let config = match &opts.config {
        Some(path) => InstanceConfig::from_file(path)?,
        None => InstanceConfig::default(),
    };
    let mut instance = VlcInstance::from_config(api.clone(), &config)?;

    let result = run(&instance, &opts.command, &api);
    instance.dispose();
    result
}

fn run(instance: &VlcInstance, command: &Command, api: &vlc::VlcApi) -> Result<(), vlc::Error> {
    match command {
        Command::Info => {
            info!("libvlc {}", api.version().unwrap_or_default());
            info!("compiler: {}", api.compiler().unwrap_or_default());
            info!("changeset: {}", api.changeset().unwrap_or_default());
            for module in instance.audio_filters()? {
                info!("audio filter: {} ({})", module.name, module.longname.unwrap_or_default());
            }
            for module in instance.video_filters()? {
                info!("video filter: {} ({})", module.name, module.longname.unwrap_or_default());
            }
        }
        Command::Play { mrl, seconds } => {
            let media = instance.media_from_location(mrl)?;
            let player = vlc::MediaPlayer::from_media(&media)?;
            player.play()?;
            info!("Playing {} for {}s", media.mrl().unwrap_or_default(), seconds);
            thread::sleep(Duration::from_secs(*seconds));
            player.stop();
        }
        Command::Broadcast {
            input,
            output,
            name,
            looping,
            seconds,
        } => {
            for kind in VlmEventKind::ALL {
                instance.subscribe(kind, |event| {
                    info!(
                        "{:?} media={} instance={}",
                        event.kind,
                        event.media_name.as_deref().unwrap_or("-"),
                        event.instance_name.as_deref().unwrap_or("-")
                    );
                })?;
            }
            let vlm = instance.vlm()?;
            vlm.add_broadcast(
                name,
                &BroadcastConfig {
                    input: input.clone(),
                    output: output.clone(),
                    enabled: true,
                    looping: *looping,
                    ..Default::default()
                },
            )?;
            vlm.play_media(name)?;
            info!("{}", vlm.show_media(name)?);
            thread::sleep(Duration::from_secs(*seconds));
            vlm.stop_media(name)?;
            vlm.del_media(name)?;
        }
    }
    match instance.take_callback_error() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
