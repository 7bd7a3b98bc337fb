use std::sync::{Arc, Mutex};

use rulekit::grammar::Triple;
use rulekit::KnowledgeBase;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for Captured {
  fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
    self.0.lock().unwrap().extend_from_slice(buf);
    Ok(buf.len())
  }

  fn flush(&mut self) -> std::io::Result<()> {
    Ok(())
  }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for Captured {
  type Writer = Captured;

  fn make_writer(&'a self) -> Self::Writer {
    self.clone()
  }
}

fn capture(f: impl FnOnce()) -> String {
  let captured = Captured::default();
  let subscriber = tracing_subscriber::fmt()
    .with_writer(captured.clone())
    .with_ansi(false)
    .without_time()
    .with_target(false)
    .finish();
  tracing::subscriber::with_default(subscriber, f);
  String::from_utf8(captured.0.lock().unwrap().clone()).unwrap()
}

#[test]
fn telling_a_fact_logs_exactly_once() {
  let output = capture(|| {
    let mut kb = KnowledgeBase::new();
    kb.tell(Triple::new("a", "is", "b")).unwrap();
    kb.tell(Triple::new("a", "is", "b")).unwrap();
  });

  assert_eq!(output.matches("adding fact \"a is b\"").count(), 1);
}

#[test]
fn derived_facts_and_rules_log_the_same_as_told_ones() {
  let output = capture(|| {
    let mut kb = KnowledgeBase::new();
    kb.tell(rulekit::Rule::new(
      vec![Triple::new("X1", "is", "X2"), Triple::new("X2", "is", "X3")],
      vec![Triple::new("X1", "is", "X3")],
    ).unwrap()).unwrap();
    kb.tell(Triple::new("a", "is", "b")).unwrap();
    kb.tell(Triple::new("b", "is", "c")).unwrap();
  });

  assert_eq!(output.matches("adding fact \"a is c\"").count(), 1);
  assert!(output.contains("adding rule"));
}
