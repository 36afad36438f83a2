use anyhow::{anyhow, Context, Result};
use bumpalo::Bump;
use core::fmt;
use regex::Regex;
use singly_linked_list::{LinkedList, Node};
use std::{env, fmt::Display, fs::File, io::Read, process};

/*
 * Script run when no file is given : builds a small list of numbers,
 * then goes through every operation, out of range ones included.
 */
const DEMO_SCRIPT: &str = "# Build the list from the back
append 1
append 2
append 3
append 4
size
prepend 0
at 0
size
pop
size

# Splice in the middle, then drop the head
insert 99 2
remove 0
find 99
contains 7
head
tail

# Nothing lives at these positions
at 4
remove 4
insert 5 10
print
";

/*
 * A single script line.
 * Values point into the arena the script was parsed with.
 */
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Append(&'a str),
    Prepend(&'a str),
    Insert(&'a str, usize),
    Remove(usize),
    Pop,
    At(usize),
    Find(&'a str),
    Contains(&'a str),
    Head,
    Tail,
    Size,
    Print,
}

/*
 * Display the command as it reads in a report line
 */
impl<'a> Display for Command<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Append(value) => write!(f, "append {}", value),
            Command::Prepend(value) => write!(f, "prepend {}", value),
            Command::Insert(value, index) => write!(f, "insert {} at {}", value, index),
            Command::Remove(index) => write!(f, "remove at {}", index),
            Command::Pop => write!(f, "pop"),
            Command::At(index) => write!(f, "at {}", index),
            Command::Find(value) => write!(f, "find {}", value),
            Command::Contains(value) => write!(f, "contains {}", value),
            Command::Head => write!(f, "head"),
            Command::Tail => write!(f, "tail"),
            Command::Size => write!(f, "size"),
            Command::Print => write!(f, "print"),
        }
    }
}

fn out_of_range<T>(list: &LinkedList<T>) -> String {
    format!("index out of range (size {})", list.size())
}

fn node_value(node: Option<&Node<&str>>) -> String {
    node.map_or("null".to_string(), |node| node.value.to_string())
}

impl<'a> Command<'a> {
    /*
     * Parse one line : <command> [arg] [arg]
     *
     * Values are copied into <bump> so that they outlive the list.
     */
    fn parse(re: &Regex, line: &str, bump: &'a Bump) -> Result<Self> {
        let captures = re
            .captures(line)
            .ok_or(anyhow!("Failed to parse line {}", line))?;
        let name = captures.get(1).map_or("", |m| m.as_str());
        let args: Vec<&str> = (2..=3)
            .filter_map(|i| captures.get(i))
            .map(|m| m.as_str())
            .collect();

        let value = move |arg: &str| -> &'a str { bump.alloc_str(arg) };
        let index = |arg: &str| -> Result<usize> {
            arg.parse::<usize>()
                .with_context(|| format!("Invalid index {}", arg))
        };

        let command = match (name, args.as_slice()) {
            ("append", &[v]) => Command::Append(value(v)),
            ("prepend", &[v]) => Command::Prepend(value(v)),
            ("insert", &[v, i]) => Command::Insert(value(v), index(i)?),
            ("remove", &[i]) => Command::Remove(index(i)?),
            ("pop", &[]) => Command::Pop,
            ("at", &[i]) => Command::At(index(i)?),
            ("find", &[v]) => Command::Find(value(v)),
            ("contains", &[v]) => Command::Contains(value(v)),
            ("head", &[]) => Command::Head,
            ("tail", &[]) => Command::Tail,
            ("size", &[]) => Command::Size,
            ("print", &[]) => Command::Print,
            _ => return Err(anyhow!("Unknown command or wrong arguments : {}", line.trim())),
        };
        Ok(command)
    }

    /*
     * Apply the command to <list> and describe the outcome.
     * Out of range positions and missing values are reported, not raised.
     */
    fn execute(&self, list: &mut LinkedList<&'a str>) -> String {
        let outcome = match *self {
            Command::Append(value) => {
                list.append(value);
                list.to_string()
            }
            Command::Prepend(value) => {
                list.prepend(value);
                list.to_string()
            }
            Command::Insert(value, index) => {
                if list.insert_at(value, index).is_some() {
                    list.to_string()
                } else {
                    out_of_range(list)
                }
            }
            Command::Remove(index) => match list.remove_at(index) {
                Some(node) => format!("removed {}, {}", node.value, list),
                None => out_of_range(list),
            },
            Command::Pop => match list.pop() {
                Some(node) => format!("removed {}, {}", node.value, list),
                None => "list is empty".to_string(),
            },
            Command::At(index) => match list.at(index) {
                Some(node) => node.value.to_string(),
                None => out_of_range(list),
            },
            Command::Find(value) => match list.find(&value) {
                Some(index) => index.to_string(),
                None => "not found".to_string(),
            },
            Command::Contains(value) => list.contains(&value).to_string(),
            Command::Head => node_value(list.head()),
            Command::Tail => node_value(list.tail()),
            Command::Size => list.size().to_string(),
            Command::Print => list.to_string(),
        };
        format!("{} : {}", self, outcome)
    }
}

/*
 * A parsed script, commands in the order they appear
 */
struct Script<'a> {
    commands: Vec<Command<'a>>,
}

impl<'a> Script<'a> {
    /*
     * Parse a script, one command per line.
     * Blank lines and lines starting with # are skipped.
     *
     * <bump> is the arena every value of the script is allocated from
     */
    fn parse(input: &str, bump: &'a Bump) -> Result<Self> {
        let re = Regex::new(r"^\s*([a-z]+)(?:\s+(\S+))?(?:\s+(\S+))?\s*$")?;
        let mut commands = vec![];
        for (n, l) in input.lines().enumerate() {
            let trimmed = l.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let command =
                Command::parse(&re, l, bump).with_context(|| format!("Line {}", n + 1))?;
            commands.push(command);
        }
        Ok(Script { commands })
    }

    /*
     * Run every command against <list>, one report line per command
     */
    fn run(&self, list: &mut LinkedList<&'a str>) -> Vec<String> {
        self.commands
            .iter()
            .map(|command| command.execute(list))
            .collect()
    }
}

fn main() -> Result<()> {
    println!("Singly linked list playground in rust :D");
    if env::args().len() > 2 {
        println!(
            "Usage : {} [script file]",
            env::args().next().unwrap_or_default()
        );
        process::exit(1);
    }

    let input = match env::args().nth(1) {
        Some(path) => {
            let mut f = File::open(path).context("Failed to open file")?;
            let mut input = String::new();
            f.read_to_string(&mut input)
                .context("Failed to read file")?;
            input
        }
        None => DEMO_SCRIPT.to_string(),
    };

    // The arena must outlive the list, which borrows every value from it
    let bump = Bump::new();
    let script = Script::parse(&input, &bump).context("Failed to parse script")?;
    let mut list = LinkedList::new();
    for report in script.run(&mut list) {
        println!("{}", report);
    }
    println!("Final list ({} nodes) :\n{}", list.size(), list);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> Vec<String> {
        let bump = Bump::new();
        let script = Script::parse(input, &bump).unwrap();
        let mut list = LinkedList::new();
        script.run(&mut list)
    }

    #[test]
    fn parse_script() {
        let input = "append 1

# comment
  insert 99 2
pop";
        let bump = Bump::new();
        let script = Script::parse(input, &bump).unwrap();
        assert_eq!(
            script.commands,
            vec![Command::Append("1"), Command::Insert("99", 2), Command::Pop]
        );
    }

    #[test]
    fn reject_bad_lines() {
        let bump = Bump::new();
        let err = Script::parse("append 1\nshuffle", &bump).err().unwrap();
        assert!(format!("{:#}", err).contains("Line 2"));

        assert!(Script::parse("insert 5", &bump).is_err());
        assert!(Script::parse("pop 3", &bump).is_err());
        assert!(Script::parse("remove x", &bump).is_err());
        assert!(Script::parse("at -1", &bump).is_err());
        assert!(Script::parse("append 1 2 3", &bump).is_err());
    }

    #[test]
    fn empty_list_reports() {
        assert_eq!(
            run("pop\nhead\ntail\nsize\nprint\nremove 0"),
            vec![
                "pop : list is empty",
                "head : null",
                "tail : null",
                "size : 0",
                "print : null",
                "remove at 0 : index out of range (size 0)",
            ]
        );
    }

    #[test]
    fn demo_script() {
        let reports = run(DEMO_SCRIPT);
        let expected = vec![
            "append 1 :  ( 1 ) -> null",
            "append 2 :  ( 1 ) ->  ( 2 ) -> null",
            "append 3 :  ( 1 ) ->  ( 2 ) ->  ( 3 ) -> null",
            "append 4 :  ( 1 ) ->  ( 2 ) ->  ( 3 ) ->  ( 4 ) -> null",
            "size : 4",
            "prepend 0 :  ( 0 ) ->  ( 1 ) ->  ( 2 ) ->  ( 3 ) ->  ( 4 ) -> null",
            "at 0 : 0",
            "size : 5",
            "pop : removed 4,  ( 0 ) ->  ( 1 ) ->  ( 2 ) ->  ( 3 ) -> null",
            "size : 4",
            "insert 99 at 2 :  ( 0 ) ->  ( 1 ) ->  ( 99 ) ->  ( 2 ) ->  ( 3 ) -> null",
            "remove at 0 : removed 0,  ( 1 ) ->  ( 99 ) ->  ( 2 ) ->  ( 3 ) -> null",
            "find 99 : 1",
            "contains 7 : false",
            "head : 1",
            "tail : 3",
            "at 4 : index out of range (size 4)",
            "remove at 4 : index out of range (size 4)",
            "insert 5 at 10 : index out of range (size 4)",
            "print :  ( 1 ) ->  ( 99 ) ->  ( 2 ) ->  ( 3 ) -> null",
        ];
        assert_eq!(reports, expected);
    }
}
