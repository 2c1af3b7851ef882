// Copyright (c) The simtest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::{Args, ValueEnum};
use std::io;
use tracing::level_filters::LevelFilter;

/// Output options shared by the CLI.
#[derive(Copy, Clone, Debug, Args)]
#[must_use]
pub struct OutputOpts {
    /// Verbose output
    #[arg(long, short, global = true, env = "SIMTEST_VERBOSE")]
    pub verbose: bool,

    /// Produce color output: auto, always, never
    #[arg(
        long,
        value_enum,
        default_value_t,
        hide_possible_values = true,
        global = true,
        value_name = "WHEN"
    )]
    pub color: Color,
}

impl OutputOpts {
    /// Initializes logging and resolves the color choice.
    pub fn init(self) -> OutputContext {
        let OutputOpts { verbose, color } = self;

        let level = if verbose {
            LevelFilter::DEBUG
        } else {
            LevelFilter::INFO
        };
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(io::stderr)
            .init();

        OutputContext { verbose, color }
    }
}

/// The resolved output settings for this process.
#[derive(Copy, Clone, Debug)]
#[must_use]
pub struct OutputContext {
    /// Whether verbose output was requested.
    pub verbose: bool,

    /// The color preference.
    pub color: Color,
}

/// When to produce color output.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
#[must_use]
pub enum Color {
    /// Produce color output if the terminal supports it.
    #[default]
    Auto,

    /// Always produce color output.
    Always,

    /// Never produce color output.
    Never,
}

impl Color {
    /// Returns true if standard output should be colorized.
    pub fn should_colorize(self) -> bool {
        match self {
            Color::Auto => supports_color::on_cached(supports_color::Stream::Stdout).is_some(),
            Color::Always => true,
            Color::Never => false,
        }
    }
}
