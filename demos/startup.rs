use std::time::Duration;

use dragon_flags::flag::{
    self, abbr, description, dirname, env, env_name, filename, mandatory, persistent,
};
use dragon_flags::{Command, FlagValue, Registry};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Settings {
    config: String,
    workdir: String,
    timeout: u64,
    log: LogSection,
}

#[derive(Debug, Deserialize)]
struct LogSection {
    level: String,
}

fn main() -> Result<(), dragon_flags::Error> {
    // Values from DEMO__LOG__LEVEL etc. sit between flag defaults and flags set on the command line.
    let mut registry = Registry::builder().with_env("DEMO", "__").build()?;

    let cmd = Command::builder("demo")
        .with_flag(flag::flag(
            "config",
            flag::string("default.yaml"),
            [persistent(), env(), mandatory(), filename(["yaml", "yml"])],
        ))
        .with_flag(flag::flag(
            "workdir",
            flag::string("."),
            [abbr('w'), description("working directory"), dirname(), env()],
        ))
        .with_flag(flag::flag(
            "timeout",
            flag::duration(Duration::from_secs(30)),
            [env()],
        ))
        .with_flag(flag::flag(
            "log-level",
            flag::string("info"),
            [env_name("log.level")],
        ))
        .build(&mut registry)?;

    // Stand-in for the argument parser.
    cmd.set_flag("config", FlagValue::String("prod.yaml".into()))?;
    cmd.validate_required_flags()?;

    let settings: Settings = registry.deserialize()?;
    println!("{settings:#?}");

    Ok(())
}
