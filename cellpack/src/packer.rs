use std::{cmp::Reverse, collections::HashMap};

use crate::{
    error::PackError,
    free_cells::FreeCells,
    geometry::Rect,
    registry::RectanglePacker,
    types::{PackResult, Placement},
};

/// Positions from a trial that placed every entry, indexed like the
/// registry's entries.
struct Trial {
    positions: Vec<(u32, u32)>,
    rightmost: u32,
}

/// The best trial seen so far during a search.
struct Best {
    positions: Vec<(u32, u32)>,
    canvas: (u32, u32),
    area: u64,
}

impl<'a, T: ?Sized> RectanglePacker<'a, T> {
    /// Searches for the placement of every entry that needs the smallest
    /// canvas.
    ///
    /// The search starts with a canvas as wide as allowed and as tall as the
    /// tallest entry. Whenever the entries don't fit, the canvas grows one
    /// unit taller. Whenever they do, the canvas shrinks one unit narrower to
    /// look for a tighter fit, until it becomes narrower than the widest
    /// entry. The packing with the smallest area wins; between packings of
    /// equal area the one found first is kept.
    ///
    /// This is a local search and does not always find the optimal packing.
    pub fn pack(&self) -> Result<PackResult<'a, T>, PackError> {
        if self.entries.is_empty() {
            log::trace!("Nothing to pack");
            return Ok(PackResult::invalid(0));
        }

        for entry in &self.entries {
            self.check_limits(entry)?;
        }

        // sort_by_key is stable, so entries of equal height stay in the order
        // they were added.
        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        order.sort_by_key(|&index| Reverse(self.entries[index].size.1));

        let widest = self
            .entries
            .iter()
            .map(|entry| entry.size.0)
            .max()
            .unwrap_or(0);
        let tallest = self.entries[order[0]].size.1;

        log::trace!(
            "Packing {} rectangles (widest {}, tallest {}) into at most {} wide",
            self.entries.len(),
            widest,
            tallest,
            self.max_width
        );

        let mut cells = FreeCells::new();
        let mut canvas = (self.max_width, tallest);
        let mut best: Option<Best> = None;
        let mut trials = 0;

        while canvas.0 >= widest {
            if let Some(max_trials) = self.max_trials {
                if trials >= max_trials {
                    log::debug!("Stopping search after {} trials", trials);
                    break;
                }
            }

            trials += 1;

            let trial = match self.run_trial(&order, &mut cells, canvas) {
                Some(trial) => trial,
                None => {
                    canvas.1 = match canvas.1.checked_add(1) {
                        Some(height) => height,
                        None => {
                            log::debug!(
                                "Stopping search, {} wide would overflow the height",
                                canvas.0
                            );
                            break;
                        }
                    };

                    if let Some(max_height) = self.max_height {
                        if canvas.1 > max_height {
                            log::debug!(
                                "Stopping search, {} wide would need more than {} height",
                                canvas.0,
                                max_height
                            );
                            break;
                        }
                    }

                    continue;
                }
            };

            let area = u64::from(trial.rightmost) * u64::from(canvas.1);
            log::trace!(
                "Trial {} packed everything into {}x{} (area {})",
                trials,
                trial.rightmost,
                canvas.1,
                area
            );

            let is_first = best.is_none();
            let is_better = best.as_ref().map_or(true, |best| area < best.area);

            if is_better {
                log::debug!("New best packing: {}x{}", trial.rightmost, canvas.1);

                best = Some(Best {
                    positions: trial.positions,
                    canvas: (trial.rightmost, canvas.1),
                    area,
                });
            }

            // Widths between the first packing's right edge and the starting
            // width went unused, so the next trial starts from that edge.
            if is_first {
                canvas.0 = trial.rightmost;
            }

            canvas.0 -= 1;
        }

        let result = match best {
            Some(best) => self.build_result(best, trials),
            None => {
                log::debug!("No packing found within the search limits");
                PackResult::invalid(trials)
            }
        };

        Ok(result)
    }

    /// Tries to place every entry on a canvas of a fixed size.
    fn run_trial(
        &self,
        order: &[usize],
        cells: &mut FreeCells,
        canvas: (u32, u32),
    ) -> Option<Trial> {
        cells.reset(canvas);

        let mut positions = vec![(0, 0); self.entries.len()];
        let mut rightmost = 0;

        for &index in order {
            let entry = &self.entries[index];

            let pos = match cells.place(entry.size) {
                Some(pos) => pos,
                None => {
                    log::trace!(
                        "{} ({}x{}) did not fit in {}x{}",
                        entry.key,
                        entry.size.0,
                        entry.size.1,
                        canvas.0,
                        canvas.1
                    );
                    return None;
                }
            };

            positions[index] = pos;
            rightmost = rightmost.max(pos.0 + entry.size.0);
        }

        Some(Trial {
            positions,
            rightmost,
        })
    }

    fn build_result(&self, best: Best, trials: u32) -> PackResult<'a, T> {
        let mut placements = Vec::with_capacity(self.entries.len());
        let mut index = HashMap::with_capacity(self.entries.len());

        for (entry, &pos) in self.entries.iter().zip(&best.positions) {
            index.insert(entry.key.clone(), placements.len());
            placements.push(Placement {
                key: entry.key.clone(),
                rect: Rect::new(pos, entry.size),
                payload: entry.payload,
            });
        }

        log::trace!(
            "Finished packing {} rectangles into {}x{} after {} trials",
            placements.len(),
            best.canvas.0,
            best.canvas.1,
            trials
        );

        PackResult {
            placements,
            index,
            canvas: best.canvas,
            packed_area: self.total_area(),
            trials,
        }
    }
}
