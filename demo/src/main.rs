use std::env;
use std::fs;
use std::io::{self, BufRead};
use std::process;

use rulekit::grammar::parse::{is_comment_or_blank, parse_line, parse_query};
use rulekit::grammar::Triple;
use rulekit::KnowledgeBase;

fn usage(prog_name: &str) -> String {
  format!(
    r"
Usage: {} [FILE]

Reads one statement per line, either from FILE or stdin:
  dog likes bone                     assert a fact
  X likes Y; Y likes X -> X friends Y    tell a rule
  ?X likes bone                      query, printing every match
Blank lines and lines starting with # are ignored.

Set RUST_LOG=info to see every fact and rule as it's added.",
    prog_name
  )
}

fn run(input: impl BufRead, kb: &mut KnowledgeBase<Triple>) {
  for (lineno, line) in input.lines().enumerate() {
    let line = match line {
      Ok(line) => line,
      Err(err) => {
        eprintln!("line {}: {}", lineno + 1, err);
        continue;
      }
    };

    if is_comment_or_blank(&line) {
      continue;
    }

    if let Some(pattern) = line.trim().strip_prefix('?') {
      match parse_query(pattern) {
        Ok(pattern) => {
          let mut found = false;
          for (fact, _) in kb.query(&pattern) {
            println!("{}", fact);
            found = true;
          }
          if !found {
            println!("(no matches)");
          }
        }
        Err(err) => eprintln!("line {}: {}", lineno + 1, err),
      }
      continue;
    }

    match parse_line(&line) {
      Ok(told) => {
        if let Err(err) = kb.tell(told) {
          eprintln!("line {}: {}", lineno + 1, err);
        }
      }
      Err(err) => eprintln!("line {}: {}", lineno + 1, err),
    }
  }
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .init();

  let args: Vec<String> = env::args().collect();
  if args.len() > 2 || args.iter().any(|a| a == "-h" || a == "--help") {
    println!("{}", usage(&args[0]));
    process::exit(if args.len() > 2 { 1 } else { 0 });
  }

  let mut kb = KnowledgeBase::new();

  if let Some(path) = args.get(1) {
    let contents = fs::read_to_string(path).unwrap_or_else(|err| {
      eprintln!("{}: {}", path, err);
      process::exit(1);
    });
    run(io::Cursor::new(contents), &mut kb);
  } else {
    run(io::stdin().lock(), &mut kb);
  }
}
