//! Report structures and formatting for CLI output.

use evoscape::landscape::EpistasisFractions;
use serde::Serialize;
use std::collections::BTreeMap;

/// Result of the `ruggedness` command.
#[derive(Debug, Serialize)]
pub(super) struct RuggednessReport {
    /// Number of local peaks.
    pub(super) peaks: usize,
    /// Mean fitness over peaks.
    pub(super) mean_peak_fitness: f64,
    /// Number of squares classified.
    pub(super) squares: usize,
    /// Share of each epistasis kind.
    pub(super) epistasis: EpistasisFractions,
    /// Mean fraction of shortest paths to the global optimum that are accessible.
    pub(super) accessibility: f64,
}

impl RuggednessReport {
    /// Format as human-readable text.
    pub(super) fn to_text(&self) -> String {
        let mut output = String::new();
        output.push_str("Landscape ruggedness\n");
        output.push_str(&format!("  Peaks:              {}\n", self.peaks));
        output.push_str(&format!("  Mean peak fitness:  {:.4}\n", self.mean_peak_fitness));
        output.push_str(&format!("  Epistasis ({} squares):\n", self.squares));
        output.push_str(&format!("    none:             {:.4}\n", self.epistasis.none));
        output.push_str(&format!("    magnitude:        {:.4}\n", self.epistasis.magnitude));
        output.push_str(&format!("    simple sign:      {:.4}\n", self.epistasis.simple_sign));
        output.push_str(&format!("    reciprocal sign:  {:.4}\n", self.epistasis.reciprocal_sign));
        output.push_str(&format!("  Accessible paths:   {:.4}\n", self.accessibility));
        output
    }

    /// Format as one tab-separated record.
    pub(super) fn to_tsv(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\n",
            self.peaks,
            self.mean_peak_fitness,
            self.epistasis.none,
            self.epistasis.magnitude,
            self.epistasis.simple_sign,
            self.epistasis.reciprocal_sign,
            self.accessibility
        )
    }
}

/// Result of the `greedy` command.
#[derive(Debug, Serialize)]
pub(super) struct GreedyReport {
    /// Number of valid genotypes.
    pub(super) genotypes: usize,
    /// Mean fitness reached.
    pub(super) mean_fitness: f64,
    /// Mean mutations to reach a peak.
    pub(super) mean_steps: f64,
    /// Reach weight per peak sequence.
    pub(super) reach: BTreeMap<String, f64>,
}

impl GreedyReport {
    /// Format as human-readable text, peaks by descending reach.
    pub(super) fn to_text(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("Greedy ascent ({} genotypes)\n", self.genotypes));
        output.push_str(&format!("  Mean fitness reached: {:.4}\n", self.mean_fitness));
        output.push_str(&format!("  Mean steps to peak:   {:.4}\n", self.mean_steps));
        output.push_str(&format!("  Peaks reached:        {}\n\n", self.reach.len()));

        let mut peaks: Vec<(&String, &f64)> = self.reach.iter().collect();
        peaks.sort_by(|a, b| b.1.total_cmp(a.1).then_with(|| a.0.cmp(b.0)));
        for (sequence, weight) in peaks {
            output.push_str(&format!("  {sequence:<12} {weight:>10.2}\n"));
        }
        output
    }

    /// Format as one tab-separated record: means, then `SEQ:weight,` pairs.
    pub(super) fn to_tsv(&self) -> String {
        let mut output = format!("{}\t{}\t", self.mean_fitness, self.mean_steps);
        for (sequence, weight) in &self.reach {
            output.push_str(&format!("{sequence}:{weight:.2},"));
        }
        output.push('\n');
        output
    }
}

/// Result of the `walk` command.
#[derive(Debug, Serialize)]
pub(super) struct WalkReport {
    /// Number of walks.
    pub(super) walks: usize,
    /// Steps between samples.
    pub(super) sample_interval: usize,
    /// Mean fitness at each sample.
    pub(super) mean_trajectory: Vec<f64>,
    /// Walks ending at each sequence.
    pub(super) endpoints: BTreeMap<String, usize>,
}

/// Endpoints listed in text output.
const TEXT_ENDPOINTS: usize = 10;

impl WalkReport {
    /// Format as human-readable text.
    pub(super) fn to_text(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("Random walks ({} walks)\n", self.walks));
        output.push_str("  Step       Mean fitness\n");
        for (i, mean) in self.mean_trajectory.iter().enumerate() {
            output.push_str(&format!("  {:<10} {mean:.4}\n", i * self.sample_interval));
        }

        let mut ends: Vec<(&String, &usize)> = self.endpoints.iter().collect();
        ends.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        output.push_str(&format!(
            "\n  Most common endpoints ({} distinct):\n",
            self.endpoints.len()
        ));
        for (sequence, count) in ends.into_iter().take(TEXT_ENDPOINTS) {
            output.push_str(&format!("  {sequence:<12} {count:>8}\n"));
        }
        output
    }

    /// Format the mean trajectory as one tab-separated record.
    pub(super) fn to_tsv(&self) -> String {
        let mut output = String::new();
        for mean in &self.mean_trajectory {
            output.push_str(&format!("{mean}\t"));
        }
        output.push('\n');
        output
    }
}

/// Result of the `code` command.
#[derive(Debug, Serialize)]
pub(super) struct CodeReport {
    /// Randomization seed.
    pub(super) seed: u64,
    /// Randomization scheme.
    pub(super) randomization: String,
    /// Share of point mutations keeping the physicochemical group.
    pub(super) robustness: f64,
    /// Where the code table was written.
    pub(super) table: String,
}

impl CodeReport {
    /// Format as human-readable text.
    pub(super) fn to_text(&self) -> String {
        format!(
            "Genetic code (seed {}, {})\n  Robustness: {:.4}\n  Written to: {}\n",
            self.seed, self.randomization, self.robustness, self.table
        )
    }

    /// Format as one tab-separated record.
    pub(super) fn to_tsv(&self) -> String {
        format!("{}\t{}\n", self.seed, self.robustness)
    }
}
