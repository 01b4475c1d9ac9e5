//! Random edit sequences checked against a plain `String`.

use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use text_buffer::{TextBuffer, TextBufferBuilder};

const SAMPLES: [&str; 8] = ["a", "Lorem ", "\n", "\r\n", "ipsum\ndolor", "é", "\r", "sit\r\namet\n"];

fn char_boundary(rng: &mut StdRng, text: &str) -> usize {
    let mut offset = rng.gen_range(0..=text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

fn reference_lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    // a '\r' only belongs to the break when a '\n' follows it
    let mut lines: Vec<String> = text
        .split_inclusive('\n')
        .map(|line| match line.strip_suffix('\n') {
            Some(line) => line.strip_suffix('\r').unwrap_or(line).to_string(),
            None => line.to_string(),
        })
        .collect();
    if text.ends_with('\n') {
        lines.push(String::new());
    }
    lines
}

#[test]
fn reference_keeps_lone_carriage_returns() {
    assert_eq!(reference_lines("a\r\nb\r"), vec!["a", "b\r"]);
    assert_eq!(reference_lines("a\n"), vec!["a", ""]);
    assert_eq!(reference_lines("\r"), vec!["\r"]);
}

fn run(seed: u64, buffer: &mut TextBuffer, expected: &mut String, steps: usize) {
    let mut rng = StdRng::seed_from_u64(seed);

    for step in 0..steps {
        match rng.gen_range(0..10) {
            0..=5 => {
                let offset = char_boundary(&mut rng, expected);
                let text = SAMPLES[rng.gen_range(0..SAMPLES.len())];
                buffer.insert(offset, text);
                expected.insert_str(offset, text);
            }
            6..=8 if !expected.is_empty() => {
                let start = char_boundary(&mut rng, expected);
                let end = char_boundary(&mut rng, expected).max(start);
                buffer.delete(start, Some(end.into()));
                expected.replace_range(start..end, "");
            }
            _ => {
                let text = SAMPLES[rng.gen_range(0..SAMPLES.len())];
                buffer.append(text);
                expected.push_str(text);
            }
        }

        if let Err(err) = buffer.tree().check_invariants() {
            panic!("seed {seed}, step {step}: {err}");
        }
        assert_eq!(buffer.char_count(), expected.len(), "seed {seed}, step {step}");
        assert_eq!(
            buffer.line_count(),
            reference_lines(expected).len(),
            "seed {seed}, step {step}"
        );
    }

    assert_eq!(buffer.get_text(), *expected);
    assert_eq!(buffer.lines(), reference_lines(expected));
}

#[test]
fn random_edits_match_string() {
    for seed in 0..20 {
        let mut buffer = TextBuffer::new();
        let mut expected = String::new();
        run(seed, &mut buffer, &mut expected, 400);
    }
}

#[test]
fn random_edits_on_loaded_text() {
    let text = "Lorem ipsum dolor sit amet,\r\nconsectetur adipiscing elit,\nsed do eiusmod\n".repeat(20);

    for seed in 100..105 {
        let mut builder = TextBufferBuilder::new();
        for line in text.split_inclusive('\n') {
            builder.accept_chunk(line);
        }
        let mut buffer = builder.finish();
        let mut expected = text.clone();
        run(seed, &mut buffer, &mut expected, 300);
    }
}

#[test]
fn random_edits_without_growth() {
    let mut builder = TextBufferBuilder::new();
    builder.growth_limit(0);
    let mut buffer = builder.finish();
    let mut expected = String::new();
    run(7, &mut buffer, &mut expected, 400);
}

#[test]
fn snapshots_restore_earlier_text() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut buffer = TextBuffer::new();
    let mut expected = String::new();
    let mut history = Vec::new();

    for round in 0..30 {
        history.push((buffer.save(), expected.clone()));
        run(1000 + round, &mut buffer, &mut expected, 20);
    }

    for _ in 0..history.len() {
        let (snapshot, text) = &history[rng.gen_range(0..history.len())];
        buffer.restore(snapshot);
        assert_eq!(buffer.get_text(), *text);
        buffer.tree().check_invariants().unwrap();

        // the restored tree must keep working
        let mut expected = text.clone();
        run(rng.r#gen(), &mut buffer, &mut expected, 10);
    }
}
