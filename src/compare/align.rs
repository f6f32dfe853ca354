// Affine-gap pairwise alignment.
//
// Three states per cell: S (symbols aligned), D (gap in the second string) and I (gap in
// the first). The back-pointers of a cell are packed into a single byte.
//
// `AffineAligner` extends a shared substring outwards during genome comparison. A gap
// opens at `gap_open` and grows by `gap_extend` per further symbol, and the best cell
// anywhere in the table is traced back to the border.
//
// `PairwiseAligner` aligns two sequences end to end (global) or picks the best-scoring
// pair of substrings (local). Here the first symbol of a gap costs
// `gap_open + gap_extend`, and the traceback reports every aligned column.

use serde::{Deserialize, Serialize};

const NEG_INF: i64 = i64::MIN / 4;
const GAP: u8 = b'-';

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoring {
    pub match_score: i64,
    pub mismatch: i64,
    pub gap_open: i64,
    pub gap_extend: i64,
}

impl Default for Scoring {
    fn default() -> Self {
        Self {
            match_score: 1,
            mismatch: -2,
            gap_open: -5,
            gap_extend: -1,
        }
    }
}

impl Scoring {
    fn substitution(&self, a: u8, b: u8) -> i64 {
        if a == b {
            self.match_score
        } else {
            self.mismatch
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment {
    pub score: i64,
    /// Aligned pairs of identical symbols on the traced-back path.
    pub matches: usize,
}

pub trait Aligner {
    fn align(&self, a: &[u8], b: &[u8]) -> Alignment;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    S,
    D,
    I,
    // A local alignment begins at this cell.
    Start,
}

impl State {
    fn code(self) -> u8 {
        match self {
            State::S => 0,
            State::D => 1,
            State::I => 2,
            State::Start => 3,
        }
    }

    fn from_code(code: u8) -> Self {
        match code & 0b11 {
            0 => State::S,
            1 => State::D,
            2 => State::I,
            _ => State::Start,
        }
    }
}

// Back-pointers for one cell: the state each of S, D and I was reached from.
#[derive(Clone, Copy, Default)]
struct Trace(u8);

impl Trace {
    fn new(from_s: State, from_d: State, from_i: State) -> Self {
        Trace(from_s.code() | from_d.code() << 2 | from_i.code() << 4)
    }

    fn prev(self, state: State) -> State {
        match state {
            State::S => State::from_code(self.0),
            State::D => State::from_code(self.0 >> 2),
            State::I => State::from_code(self.0 >> 4),
            State::Start => State::Start,
        }
    }
}

// First candidate with the strictly highest score.
fn best_of<const N: usize>(candidates: [(i64, State); N]) -> (i64, State) {
    let mut best = candidates[0];
    for &candidate in &candidates[1..] {
        if candidate.0 > best.0 {
            best = candidate;
        }
    }
    best
}

#[derive(Clone, Copy, Debug, Default)]
pub struct AffineAligner {
    pub scoring: Scoring,
}

impl AffineAligner {
    pub fn new(scoring: Scoring) -> Self {
        Self { scoring }
    }
}

impl Aligner for AffineAligner {
    fn align(&self, a: &[u8], b: &[u8]) -> Alignment {
        if a.is_empty() || b.is_empty() {
            return Alignment::default();
        }
        let Scoring {
            gap_open,
            gap_extend,
            ..
        } = self.scoring;
        let (m, n) = (a.len(), b.len());
        let width = n + 1;

        // Scores only need the previous row; back-pointers are kept for the whole table.
        let mut prev_s = vec![NEG_INF; width];
        let mut prev_d = vec![NEG_INF; width];
        let mut prev_i: Vec<i64> = (0..width)
            .map(|j| gap_open + (j as i64 - 1) * gap_extend)
            .collect();
        prev_s[0] = 0;
        prev_d[0] = gap_open;
        prev_i[0] = gap_open;
        let mut cur_s = vec![NEG_INF; width];
        let mut cur_d = vec![NEG_INF; width];
        let mut cur_i = vec![NEG_INF; width];
        let mut trace = vec![Trace::default(); (m + 1) * width];

        let mut best = (NEG_INF, 0, 0, State::S);
        for i in 1..=m {
            cur_s[0] = NEG_INF;
            cur_d[0] = gap_open + (i as i64 - 1) * gap_extend;
            cur_i[0] = NEG_INF;
            for j in 1..=n {
                let sub = self.scoring.substitution(a[i - 1], b[j - 1]);
                let (s, from_s) = best_of([
                    (prev_s[j - 1], State::S),
                    (prev_d[j - 1], State::D),
                    (prev_i[j - 1], State::I),
                ]);
                cur_s[j] = s + sub;
                let (d, from_d) =
                    best_of([(prev_s[j] + gap_open, State::S), (prev_d[j] + gap_extend, State::D)]);
                cur_d[j] = d;
                let (ins, from_i) = best_of([
                    (cur_s[j - 1] + gap_open, State::S),
                    (cur_i[j - 1] + gap_extend, State::I),
                ]);
                cur_i[j] = ins;

                trace[i * width + j] = Trace::new(from_s, from_d, from_i);
                for (score, state) in [(cur_s[j], State::S), (cur_d[j], State::D), (cur_i[j], State::I)] {
                    if score > best.0 {
                        best = (score, i, j, state);
                    }
                }
            }
            std::mem::swap(&mut prev_s, &mut cur_s);
            std::mem::swap(&mut prev_d, &mut cur_d);
            std::mem::swap(&mut prev_i, &mut cur_i);
        }

        let (score, mut i, mut j, mut state) = best;
        let mut matches = 0;
        while i > 0 && j > 0 {
            let cell = trace[i * width + j];
            match state {
                State::S => {
                    if a[i - 1] == b[j - 1] {
                        matches += 1;
                    }
                    i -= 1;
                    j -= 1;
                }
                State::D => i -= 1,
                State::I => j -= 1,
                State::Start => break,
            }
            state = cell.prev(state);
        }
        Alignment { score, matches }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AlignMode {
    /// Both sequences end to end.
    #[default]
    Global,
    /// The best-scoring pair of substrings.
    Local,
}

/// A traced-back alignment, column by column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentReport {
    pub score: i64,
    pub matches: usize,
    pub mismatches: usize,
    pub gap_opens: usize,
    /// Gap columns, the first column of every gap included.
    pub gap_extensions: usize,
    /// Where the aligned region starts in each input. Always 0 for global alignments.
    pub start_a: usize,
    pub start_b: usize,
    pub aligned_a: String,
    pub aligned_b: String,
}

impl AlignmentReport {
    /// The score implied by the column counts.
    pub fn rescore(&self, scoring: &Scoring) -> i64 {
        self.matches as i64 * scoring.match_score
            + self.mismatches as i64 * scoring.mismatch
            + self.gap_opens as i64 * scoring.gap_open
            + self.gap_extensions as i64 * scoring.gap_extend
    }
}

// Full score and back-pointer tables, row-major.
struct Table {
    width: usize,
    s: Vec<i64>,
    d: Vec<i64>,
    i: Vec<i64>,
    trace: Vec<Trace>,
}

impl Table {
    fn new(m: usize, n: usize) -> Self {
        let cells = (m + 1) * (n + 1);
        Self {
            width: n + 1,
            s: vec![NEG_INF; cells],
            d: vec![NEG_INF; cells],
            i: vec![NEG_INF; cells],
            trace: vec![Trace::default(); cells],
        }
    }

    #[inline]
    fn at(&self, i: usize, j: usize) -> usize {
        i * self.width + j
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PairwiseAligner {
    pub scoring: Scoring,
    pub mode: AlignMode,
}

impl PairwiseAligner {
    pub fn new(scoring: Scoring, mode: AlignMode) -> Self {
        Self { scoring, mode }
    }

    pub fn report(&self, a: &[u8], b: &[u8]) -> AlignmentReport {
        let table = self.fill(a, b);
        let (m, n) = (a.len(), b.len());
        match self.mode {
            AlignMode::Global => {
                let end = table.at(m, n);
                let (score, state) = best_of([
                    (table.s[end], State::S),
                    (table.d[end], State::D),
                    (table.i[end], State::I),
                ]);
                self.traceback(a, b, &table, (m, n, state), score)
            }
            AlignMode::Local => {
                let mut best = (0, 0, 0);
                for i in 1..=m {
                    for j in 1..=n {
                        let score = table.s[table.at(i, j)];
                        if score > best.0 {
                            best = (score, i, j);
                        }
                    }
                }
                match best {
                    (0, _, _) => AlignmentReport::default(),
                    (score, i, j) => self.traceback(a, b, &table, (i, j, State::S), score),
                }
            }
        }
    }

    fn fill(&self, a: &[u8], b: &[u8]) -> Table {
        let Scoring {
            gap_open,
            gap_extend,
            ..
        } = self.scoring;
        let open = gap_open + gap_extend;
        let local = self.mode == AlignMode::Local;
        let (m, n) = (a.len(), b.len());
        let mut table = Table::new(m, n);

        table.s[0] = 0;
        if local {
            for i in 1..=m {
                let cell = table.at(i, 0);
                table.s[cell] = 0;
            }
            for j in 1..=n {
                let cell = table.at(0, j);
                table.s[cell] = 0;
            }
        } else {
            for i in 1..=m {
                let cell = table.at(i, 0);
                table.d[cell] = gap_open + i as i64 * gap_extend;
                let from_d = if i == 1 { State::S } else { State::D };
                table.trace[cell] = Trace::new(State::S, from_d, State::I);
            }
            for j in 1..=n {
                let cell = table.at(0, j);
                table.i[cell] = gap_open + j as i64 * gap_extend;
                let from_i = if j == 1 { State::S } else { State::I };
                table.trace[cell] = Trace::new(State::S, State::D, from_i);
            }
        }

        for i in 1..=m {
            for j in 1..=n {
                let (diag, up, left, here) = (
                    table.at(i - 1, j - 1),
                    table.at(i - 1, j),
                    table.at(i, j - 1),
                    table.at(i, j),
                );
                let (mut s, mut from_s) = best_of([
                    (table.s[diag], State::S),
                    (table.d[diag], State::D),
                    (table.i[diag], State::I),
                ]);
                if local && s <= 0 {
                    s = 0;
                    from_s = State::Start;
                }
                table.s[here] = s + self.scoring.substitution(a[i - 1], b[j - 1]);

                let (d, from_d) = best_of([
                    (table.d[up] + gap_extend, State::D),
                    (table.s[up] + open, State::S),
                    (table.i[up] + open, State::I),
                ]);
                table.d[here] = d;
                let (ins, from_i) = best_of([
                    (table.i[left] + gap_extend, State::I),
                    (table.s[left] + open, State::S),
                    (table.d[left] + open, State::D),
                ]);
                table.i[here] = ins;
                table.trace[here] = Trace::new(from_s, from_d, from_i);
            }
        }
        table
    }

    fn traceback(
        &self,
        a: &[u8],
        b: &[u8],
        table: &Table,
        (mut i, mut j, mut state): (usize, usize, State),
        score: i64,
    ) -> AlignmentReport {
        let mut report = AlignmentReport {
            score,
            ..Default::default()
        };
        let mut aligned_a = Vec::new();
        let mut aligned_b = Vec::new();
        while i > 0 || j > 0 {
            let prev = table.trace[table.at(i, j)].prev(state);
            match state {
                State::S if i > 0 && j > 0 => {
                    let (x, y) = (a[i - 1], b[j - 1]);
                    if x == y {
                        report.matches += 1;
                    } else {
                        report.mismatches += 1;
                    }
                    aligned_a.push(x);
                    aligned_b.push(y);
                    i -= 1;
                    j -= 1;
                }
                State::D if i > 0 => {
                    aligned_a.push(a[i - 1]);
                    aligned_b.push(GAP);
                    report.gap_extensions += 1;
                    if prev != State::D {
                        report.gap_opens += 1;
                    }
                    i -= 1;
                }
                State::I if j > 0 => {
                    aligned_a.push(GAP);
                    aligned_b.push(b[j - 1]);
                    report.gap_extensions += 1;
                    if prev != State::I {
                        report.gap_opens += 1;
                    }
                    j -= 1;
                }
                _ => break,
            }
            state = prev;
        }
        aligned_a.reverse();
        aligned_b.reverse();
        report.start_a = i;
        report.start_b = j;
        report.aligned_a = String::from_utf8_lossy(&aligned_a).into_owned();
        report.aligned_b = String::from_utf8_lossy(&aligned_b).into_owned();
        report
    }
}

impl Aligner for PairwiseAligner {
    fn align(&self, a: &[u8], b: &[u8]) -> Alignment {
        let report = self.report(a, b);
        Alignment {
            score: report.score,
            matches: report.matches,
        }
    }
}
