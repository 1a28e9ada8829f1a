use crate::error::{Error, Result};
use crate::fifo::FifoPolicy;
use crate::lru::LruPolicy;
use crate::opt::OptPolicy;
use crate::policy::{PolicyKind, ReplacementPolicy};
use crate::reference::Page;

/// Memory state after one reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    /// resident pages after this step, never longer than the frame capacity
    pub frames: Vec<Page>,
    pub page: Page,
    pub fault: bool,
    /// page replaced in this step
    pub evicted: Option<Page>,
}

/// Result of running one policy over a reference string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simulation {
    policy: PolicyKind,
    frames_count: usize,
    fault_count: u32,
    history: Vec<StepRecord>,
}

impl Simulation {
    pub fn policy(&self) -> PolicyKind {
        self.policy
    }

    pub fn frames_count(&self) -> usize {
        self.frames_count
    }

    pub fn fault_count(&self) -> u32 {
        self.fault_count
    }

    pub fn hit_count(&self) -> u32 {
        self.history.len() as u32 - self.fault_count
    }

    pub fn history(&self) -> &[StepRecord] {
        &self.history
    }

    pub fn percent_fault(&self) -> f64 {
        if self.history.is_empty() {
            return 0.0;
        }
        100.0 * f64::from(self.fault_count) / self.history.len() as f64
    }

    pub fn percent_hit(&self) -> f64 {
        if self.history.is_empty() {
            return 0.0;
        }
        100.0 * f64::from(self.hit_count()) / self.history.len() as f64
    }

    pub fn format_summary(&self) -> String {
        [
            format!("Policy: {}", self.policy.title()),
            format!(
                "Frames: {}, References: {}",
                self.frames_count,
                self.history.len()
            ),
            format!(
                "Page Faults: {}, Hits: {}",
                self.fault_count,
                self.hit_count()
            ),
            format!("Percent Faults: {:.3}%", self.percent_fault()),
            format!("Percent Hits: {:.3}%", self.percent_hit()),
        ]
        .join("\n")
    }

    /// One row per frame slot, one column per step and a last row with the referenced page.
    /// Columns of faulting steps are marked with `*`.
    pub fn format_trace(&self) -> String {
        let width = self
            .history
            .iter()
            .map(|step| step.page.to_string().len())
            .max()
            .unwrap_or(1)
            + 1;

        let mut rows = Vec::with_capacity(self.frames_count + 2);
        for slot in 0..self.frames_count {
            let row = self
                .history
                .iter()
                .map(|step| match step.frames.get(slot) {
                    Some(page) => format!("{page:>width$}"),
                    None => format!("{:>width$}", "."),
                })
                .collect::<String>();
            rows.push(format!("frame {slot:<3}|{row}"));
        }

        rows.push(format!("{}+{}", "-".repeat(9), "-".repeat(width * self.history.len())));
        rows.push(format!(
            "{:<9}|{}",
            "page",
            self.history
                .iter()
                .map(|step| format!("{:>width$}", step.page))
                .collect::<String>()
        ));
        rows.push(format!(
            "{:<9}|{}",
            "fault",
            self.history
                .iter()
                .map(|step| format!("{:>width$}", if step.fault { "*" } else { "" }))
                .collect::<String>()
        ));

        rows.join("\n")
    }
}

/// Runs `policy` over `pages` from left to right.
pub fn simulate<P: ReplacementPolicy>(mut policy: P, pages: &[Page]) -> Simulation {
    let frames_count = policy.capacity();
    let mut history = Vec::with_capacity(pages.len());
    let mut fault_count = 0;

    for (i, page) in pages.iter().enumerate() {
        let access = policy.access(*page, &pages[i + 1..]);
        log::trace!("{} step {i}: page {page} {access}", policy.kind());
        if access.is_fault() {
            fault_count += 1;
        }

        history.push(StepRecord {
            frames: policy.frames(),
            page: *page,
            fault: access.is_fault(),
            evicted: access.evicted(),
        });
    }

    log::info!(
        "{} with {frames_count} frames: {fault_count} faults over {} references",
        policy.kind(),
        pages.len()
    );

    Simulation {
        policy: policy.kind(),
        frames_count,
        fault_count,
        history,
    }
}

fn check_frames_count(frames_count: usize) -> Result<()> {
    if frames_count == 0 {
        return Err(Error::InvalidArgument(
            "number of frames must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

pub fn fifo_visual(pages: &[Page], frames_count: usize) -> Result<Simulation> {
    check_frames_count(frames_count)?;
    Ok(simulate(FifoPolicy::new(frames_count), pages))
}

pub fn lru_visual(pages: &[Page], frames_count: usize) -> Result<Simulation> {
    check_frames_count(frames_count)?;
    Ok(simulate(LruPolicy::new(frames_count), pages))
}

pub fn opt_visual(pages: &[Page], frames_count: usize) -> Result<Simulation> {
    check_frames_count(frames_count)?;
    Ok(simulate(OptPolicy::new(frames_count), pages))
}

pub fn run_policy(policy: PolicyKind, pages: &[Page], frames_count: usize) -> Result<Simulation> {
    match policy {
        PolicyKind::Fifo => fifo_visual(pages, frames_count),
        PolicyKind::Lru => lru_visual(pages, frames_count),
        PolicyKind::Opt => opt_visual(pages, frames_count),
    }
}

/// FIFO, LRU and OPT in that order.
pub fn simulate_all(pages: &[Page], frames_count: usize) -> Result<Vec<Simulation>> {
    PolicyKind::ALL
        .into_iter()
        .map(|policy| run_policy(policy, pages, frames_count))
        .collect()
}

/// Summaries ordered from fewest to most faults, each with its overhead relative to the best one.
pub fn compare(simulations: &[Simulation]) -> String {
    let mut results = simulations.iter().collect::<Vec<_>>();
    results.sort_by_key(|sim| sim.fault_count);

    let Some(baseline) = results.first().map(|sim| sim.fault_count) else {
        return String::new();
    };

    let mut lines = vec![format!(
        "Page Faults -> {}",
        simulations
            .iter()
            .map(|sim| format!("{}: {}", sim.policy, sim.fault_count))
            .collect::<Vec<_>>()
            .join(" | ")
    )];
    lines.push(String::new());

    for sim in results {
        let relative = if baseline == 0 {
            0.0
        } else {
            f64::from(sim.fault_count - baseline) / f64::from(baseline) * 100.0
        };
        lines.push(sim.format_summary());
        lines.push(format!("Relative Faults: +{relative:.3}%\n"));
    }

    lines.join("\n")
}

/// Frame capacities in `2..=max_frames` for which FIFO faults more often than with one frame less.
pub fn belady_anomalies(pages: &[Page], max_frames: usize) -> Result<Vec<usize>> {
    check_frames_count(max_frames)?;

    let faults = (1..=max_frames)
        .map(|frames_count| simulate(FifoPolicy::new(frames_count), pages).fault_count)
        .collect::<Vec<_>>();

    let anomalies = faults
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[1] > pair[0])
        .map(|(i, _)| i + 2)
        .collect::<Vec<_>>();

    log::info!("belady scan up to {max_frames} frames: faults {faults:?}, anomalies at {anomalies:?}");

    Ok(anomalies)
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use super::*;

    const TEXTBOOK: [Page; 13] = [7, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2];

    fn frames(sim: &Simulation) -> Vec<Vec<Page>> {
        sim.history().iter().map(|step| step.frames.clone()).collect()
    }

    fn faults(sim: &Simulation) -> Vec<bool> {
        sim.history().iter().map(|step| step.fault).collect()
    }

    #[test]
    fn fifo_textbook_trace() {
        let sim = fifo_visual(&TEXTBOOK, 3).unwrap();
        assert_eq!(sim.fault_count(), 10);
        assert_eq!(
            frames(&sim),
            vec![
                vec![7],
                vec![7, 0],
                vec![7, 0, 1],
                vec![0, 1, 2],
                vec![0, 1, 2],
                vec![1, 2, 3],
                vec![2, 3, 0],
                vec![3, 0, 4],
                vec![0, 4, 2],
                vec![4, 2, 3],
                vec![2, 3, 0],
                vec![2, 3, 0],
                vec![2, 3, 0],
            ]
        );
    }

    #[test]
    fn lru_textbook_trace() {
        let sim = lru_visual(&TEXTBOOK, 3).unwrap();
        assert_eq!(sim.fault_count(), 9);
        assert_eq!(
            faults(&sim),
            vec![true, true, true, true, false, true, false, true, true, true, true, false, false]
        );
        let evicted = sim
            .history()
            .iter()
            .filter_map(|step| step.evicted)
            .collect::<Vec<_>>();
        assert_eq!(evicted, vec![7, 1, 2, 3, 0, 4]);
        assert_eq!(sim.history().last().unwrap().frames, vec![2, 3, 0]);
    }

    #[test]
    fn opt_textbook_trace() {
        let sim = opt_visual(&TEXTBOOK, 3).unwrap();
        assert_eq!(sim.fault_count(), 7);
        assert_eq!(
            frames(&sim),
            vec![
                vec![7],
                vec![7, 0],
                vec![7, 0, 1],
                vec![2, 0, 1],
                vec![2, 0, 1],
                vec![2, 0, 3],
                vec![2, 0, 3],
                vec![2, 4, 3],
                vec![2, 4, 3],
                vec![2, 4, 3],
                vec![2, 0, 3],
                vec![2, 0, 3],
                vec![2, 0, 3],
            ]
        );
    }

    #[test]
    fn lru_evicts_least_recently_used() {
        let sim = lru_visual(&[1, 2, 3, 1, 4], 3).unwrap();
        assert_eq!(sim.fault_count(), 4);
        assert_eq!(faults(&sim), vec![true, true, true, false, true]);
        let last = sim.history().last().unwrap();
        assert_eq!(last.evicted, Some(2));
        assert_eq!(last.frames, vec![1, 3, 4]);
    }

    #[test]
    fn zero_frames_is_rejected() {
        for policy in PolicyKind::ALL {
            assert!(matches!(
                run_policy(policy, &TEXTBOOK, 0),
                Err(Error::InvalidArgument(_))
            ));
        }
        assert!(belady_anomalies(&TEXTBOOK, 0).is_err());
    }

    #[test]
    fn empty_reference_string() {
        for sim in simulate_all(&[], 3).unwrap() {
            assert_eq!(sim.fault_count(), 0);
            assert!(sim.history().is_empty());
            assert_eq!(sim.percent_fault(), 0.0);
        }
    }

    #[test]
    fn belady_classic_anomaly() {
        let pages = [1, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5];
        assert_eq!(fifo_visual(&pages, 3).unwrap().fault_count(), 9);
        assert_eq!(fifo_visual(&pages, 4).unwrap().fault_count(), 10);
        assert_eq!(belady_anomalies(&pages, 4).unwrap(), vec![4]);
    }

    #[test]
    fn compare_lists_best_first() {
        let report = compare(&simulate_all(&TEXTBOOK, 3).unwrap());
        assert!(report.starts_with("Page Faults -> FIFO: 10 | LRU: 9 | OPT: 7"));
        let opt = report.find("Policy: Optimal").unwrap();
        let lru = report.find("Policy: LRU").unwrap();
        let fifo = report.find("Policy: FIFO").unwrap();
        assert!(opt < lru && lru < fifo);
        assert!(compare(&[]).is_empty());
    }

    #[test]
    fn trace_grid_shape() {
        let sim = fifo_visual(&[1, 2, 1], 2).unwrap();
        let trace = sim.format_trace();
        let lines = trace.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2 + 3);
        assert_eq!(lines[0], "frame 0  | 1 1 1");
        assert_eq!(lines[1], "frame 1  | . 2 2");
        assert_eq!(lines[2], "---------+------");
        assert_eq!(lines[3], "page     | 1 2 1");
        assert_eq!(lines[4], "fault    | * *  ");
    }

    fn reference() -> impl Strategy<Value = Vec<Page>> {
        prop::collection::vec(0..10u32, 0..80)
    }

    proptest! {
        #[test]
        fn prop_fault_count_matches_history(pages in reference(), frames_count in 1_usize..8) {
            for sim in simulate_all(&pages, frames_count).unwrap() {
                let faults = sim.history().iter().filter(|step| step.fault).count();
                prop_assert_eq!(sim.fault_count() as usize, faults);
                prop_assert_eq!(sim.history().len(), pages.len());
                for step in sim.history() {
                    prop_assert!(step.evicted.is_none() || step.fault);
                }
            }
        }

        #[test]
        fn prop_frames_bounded_and_filling(pages in reference(), frames_count in 1_usize..8) {
            for sim in simulate_all(&pages, frames_count).unwrap() {
                let mut previous = 0;
                for step in sim.history() {
                    prop_assert!(step.frames.len() <= frames_count);
                    prop_assert!(step.frames.len() >= previous);
                    prop_assert!(step.frames.contains(&step.page));
                    if previous == frames_count {
                        prop_assert_eq!(step.frames.len(), frames_count);
                    }
                    previous = step.frames.len();
                }
            }
        }

        #[test]
        fn prop_opt_is_a_lower_bound(pages in reference(), frames_count in 1_usize..8) {
            let opt = opt_visual(&pages, frames_count).unwrap().fault_count();
            prop_assert!(opt <= fifo_visual(&pages, frames_count).unwrap().fault_count());
            prop_assert!(opt <= lru_visual(&pages, frames_count).unwrap().fault_count());
        }

        #[test]
        fn prop_deterministic(pages in reference(), frames_count in 1_usize..8) {
            prop_assert_eq!(
                simulate_all(&pages, frames_count).unwrap(),
                simulate_all(&pages, frames_count).unwrap()
            );
        }

        #[test]
        fn prop_fifo_evicts_in_insertion_order(pages in prop::collection::vec(0..1000u32, 0..60), frames_count in 1_usize..6) {
            // distinct pages are never re-requested, so every eviction follows insertion order
            let mut distinct = Vec::new();
            for page in pages {
                if !distinct.contains(&page) {
                    distinct.push(page);
                }
            }
            let sim = fifo_visual(&distinct, frames_count).unwrap();
            let evicted = sim.history().iter().filter_map(|step| step.evicted).collect::<Vec<_>>();
            let expected = distinct.len().saturating_sub(frames_count);
            prop_assert_eq!(&evicted[..], &distinct[..expected]);
        }
    }
}
