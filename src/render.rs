// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Drives a whole render: splits the point budget between workers,
//! runs them, folds their canvases together, and tone maps the result.

use canvas::Canvas;
use chaos::ChaosGame;
use config::FlameConfig;
use crossbeam::thread::ScopedJoinHandle;
use errors::FlameError;
use image::RgbImage;
use planes::PlaneMapper;
use rand::rngs::StdRng;
use rand::SeedableRng;
use symmetry::Symmetry;
use tone::ToneMapper;

/// Split `points` as evenly as possible between `threads` workers.
/// The first `points % threads` workers take one extra, so the shares
/// always add back up to `points`.
pub fn split_points(points: usize, threads: usize) -> Vec<usize> {
    assert!(threads > 0, "cannot split points across zero threads");
    let (share, extra) = (points / threads, points % threads);
    (0..threads)
        .map(|i| if i < extra { share + 1 } else { share })
        .collect()
}

/// A random source for one worker.  Seeded renders give worker `i`
/// the seed `seed + i`; unseeded ones ask the operating system.
fn worker_rng(seed: Option<u64>, worker: usize) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(worker as u64)),
        None => StdRng::from_entropy(),
    }
}

/// Run `work(worker, points)` on one scoped thread per share and
/// collect the canvases in worker order.  Every thread is joined
/// before this returns; the first one that panicked, if any, decides
/// the error.
fn run_workers<F>(shares: &[usize], work: F) -> Result<Vec<Canvas>, FlameError>
where
    F: Fn(usize, usize) -> Canvas + Sync,
{
    let work = &work;
    let results: Vec<Result<Canvas, FlameError>> = crossbeam::scope(|spawner| {
        let handles: Vec<ScopedJoinHandle<Canvas>> = shares
            .iter()
            .enumerate()
            .map(|(worker, &points)| spawner.spawn(move |_| work(worker, points)))
            .collect();

        handles
            .into_iter()
            .enumerate()
            .map(|(worker, handle)| handle.join().map_err(|_| FlameError::WorkerFailure(worker)))
            .collect()
    })
    .map_err(|_| FlameError::WorkerFailure(0))?;

    results.into_iter().collect()
}

/// A validated render, ready to run.  Once built, none of it changes.
pub struct Renderer {
    config: FlameConfig,
    plane: PlaneMapper,
    symmetry: Symmetry,
    tone: ToneMapper,
}

impl Renderer {
    /// Checks the configuration and prepares the plane mapping and
    /// symmetry for it.
    pub fn new(config: FlameConfig) -> Result<Self, FlameError> {
        config.validate()?;
        let window = config.effective_window();
        let plane = PlaneMapper::new(config.width, config.height, window.0, window.1)?;
        let symmetry = Symmetry::new(config.symmetry);
        let tone = ToneMapper::new(config.gamma);
        Ok(Renderer {
            config,
            plane,
            symmetry,
            tone,
        })
    }

    /// The configuration this renderer was built from.
    pub fn config(&self) -> &FlameConfig {
        &self.config
    }

    fn game(&self) -> ChaosGame {
        ChaosGame::new(
            &self.config.matrices,
            self.config.variation,
            &self.plane,
            &self.symmetry,
            self.config.iterations,
        )
    }

    /// Run every worker and merge their canvases, without tone
    /// mapping.  A single thread runs on the caller's; more than one
    /// get a scoped thread each.  If any worker dies the whole render
    /// is abandoned.
    pub fn accumulate(&self) -> Result<Canvas, FlameError> {
        let shares = split_points(self.config.points, self.config.threads);
        let game = self.game();
        let seed = self.config.seed;

        info!(
            "rendering {} points x {} iterations with {} on {} thread(s), symmetry {}",
            self.config.points,
            self.config.iterations,
            self.config.variation,
            self.config.threads,
            self.symmetry.order()
        );

        let game = &game;
        let work = |worker: usize, points: usize| {
            let (canvas, plotted) = game.run(points, &mut worker_rng(seed, worker));
            debug!("worker {}: {} points, {} landings", worker, points, plotted);
            canvas
        };

        let canvases = if shares.len() == 1 {
            vec![work(0, shares[0])]
        } else {
            run_workers(&shares, work)?
        };

        let mut merged = Canvas::new(self.config.width, self.config.height);
        for canvas in &canvases {
            merged.merge(canvas);
        }
        debug!("merged {} canvases, {} cells populated", shares.len(), merged.populated());
        Ok(merged)
    }

    /// The whole pipeline: accumulate, tone map, lay out the raster.
    pub fn render(&self) -> Result<RgbImage, FlameError> {
        let mut canvas = self.accumulate()?;
        self.tone.apply(&mut canvas);
        info!(
            "tone mapped {} populated cells with gamma {}",
            canvas.populated(),
            self.tone.gamma()
        );
        canvas.to_raster()
    }
}
