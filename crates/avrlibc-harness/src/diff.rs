//! Diff rendering for fixture comparison.

/// Render a text diff between expected and actual output. Single-line
/// values also get the column of the first differing byte.
#[must_use]
pub fn render_diff(expected: &str, actual: &str) -> String {
    if expected == actual {
        return String::from("[identical]");
    }

    let mut out = String::from("--- expected\n+++ actual\n");
    let exp: Vec<&str> = expected.lines().collect();
    let act: Vec<&str> = actual.lines().collect();
    for i in 0..exp.len().max(act.len()) {
        let (e, a) = (exp.get(i).copied(), act.get(i).copied());
        if e == a {
            continue;
        }
        match (e, a) {
            (Some(e), Some(a)) => {
                let col = first_difference(e, a);
                out.push_str(&format!("@@ line {}, col {} @@\n-{e}\n+{a}\n", i + 1, col + 1));
            }
            (Some(e), None) => out.push_str(&format!("@@ line {} @@\n-{e}\n", i + 1)),
            (None, Some(a)) => out.push_str(&format!("@@ line {} @@\n+{a}\n", i + 1)),
            (None, None) => {}
        }
    }
    out
}

fn first_difference(a: &str, b: &str) -> usize {
    a.bytes()
        .zip(b.bytes())
        .position(|(x, y)| x != y)
        .unwrap_or_else(|| a.len().min(b.len()))
}
