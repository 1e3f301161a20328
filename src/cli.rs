use std::path::PathBuf;

use crate::{search::SearchConfig, state::CharacterId, strategy::StrategyKind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandLineConfig {
    pub command: String,
    pub matrix: Option<PathBuf>,
    pub state: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub descriptor: Option<PathBuf>,
    pub character: Option<CharacterId>,
    pub search: SearchConfig,
}

impl CommandLineConfig {
    pub fn from_args(args: &[&str]) -> Result<Self, String> {
        let mut command = String::from("search");
        let mut matrix = None;
        let mut state = None;
        let mut output = None;
        let mut descriptor = None;
        let mut character = None;
        let mut strategy = String::from("in-order");
        let mut seed = 0u64;
        let mut max_depth = None;
        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            match *arg {
                "--command" => command = required(&mut iter, "--command")?.to_string(),
                "--matrix" => matrix = Some(PathBuf::from(required(&mut iter, "--matrix")?)),
                "--state" => state = Some(PathBuf::from(required(&mut iter, "--state")?)),
                "--output" | "-o" => {
                    output = Some(PathBuf::from(required(&mut iter, "--output")?))
                }
                "--descriptor" => {
                    descriptor = Some(PathBuf::from(required(&mut iter, "--descriptor")?))
                }
                "--character" => {
                    character = Some(parse_number(required(&mut iter, "--character")?)?)
                }
                "--strategy" => strategy = required(&mut iter, "--strategy")?.to_string(),
                "--seed" => seed = parse_number(required(&mut iter, "--seed")?)?,
                "--max-depth" => {
                    max_depth = Some(parse_number(required(&mut iter, "--max-depth")?)?)
                }
                other if other.starts_with('-') => {
                    return Err(format!("unknown flag {other}"));
                }
                _ => {
                    command = arg.to_string();
                }
            }
        }
        Ok(Self {
            command,
            matrix,
            state,
            output,
            descriptor,
            character,
            search: SearchConfig {
                max_depth,
                strategy: StrategyKind::parse(&strategy, seed)?,
            },
        })
    }

    pub fn help() -> &'static str {
        "Usage: cppp [build|search|realize|replay|check]\n\
         \x20 --matrix PATH        JSON array of 0/1 rows, one per species\n\
         \x20 --state PATH         state file written by `build` or `realize`\n\
         \x20 --output PATH        where to write the resulting state\n\
         \x20 --character N        character to realize\n\
         \x20 --descriptor PATH    replay descriptor {input, characters, output}\n\
         \x20 --strategy NAME      in-order|color|conflict|shuffled\n\
         \x20 --seed N             seed for the shuffled strategy\n\
         \x20 --max-depth N        bound on the search depth\n"
    }
}

fn required<'a, 'b: 'a>(
    iter: &mut impl Iterator<Item = &'a &'b str>,
    flag: &str,
) -> Result<&'b str, String> {
    iter.next()
        .copied()
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn parse_number<T: std::str::FromStr>(value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("expected a non-negative integer, got {value}"))
}
