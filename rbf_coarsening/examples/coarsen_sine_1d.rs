use rbf_coarsening::{
    create_evaluation_grid, progress::closure_sink, AdaptiveCoarsening, Coarsener,
    CoarseningTestFunctions, config::CoarseningParams, kernels::CubicRbfKernel,
    progress::ProgressMsg,
};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 200 source points and 75 target points on the unit interval
    let source_points = create_evaluation_grid(&[(0.0, 1.0)], &[200]);
    let target_points = create_evaluation_grid(&[(0.0, 1.0)], &[75]);

    // Print each greedy step as it happens
    let (sink, listener) = closure_sink(64, |msg| match msg {
        ProgressMsg::SelectionIteration { iter, basis_size, error } => {
            println!("iter {:>3}  basis {:>3}  error {:.3e}", iter, basis_size, error)
        }
        other => println!("{:?}", other),
    });

    let params = CoarseningParams::builder()
        .tolerance(1e-4)
        .reselection_tolerance(1e-2)
        .min_points(2)
        .max_points(100)
        .build();

    let mut coarsening = AdaptiveCoarsening::new(params)?.progress_callback(sink);
    coarsening.compute(Arc::new(CubicRbfKernel), source_points.clone(), target_points)?;

    // A slow wave, the same wave with a larger amplitude, then a faster one
    for (amplitude, frequency) in [(1.0, 1.0), (2.0, 1.0), (1.0, 4.0)] {
        let wave = CoarseningTestFunctions::sine_wave(&source_points, frequency);
        let values = faer::Mat::from_fn(wave.nrows(), 1, |i, _| amplitude * wave[(i, 0)]);

        let _mapped = coarsening.interpolate(&values)?;

        println!(
            "amplitude {} frequency {}: {} points, reselections so far {}",
            amplitude,
            frequency,
            coarsening.selection().len(),
            coarsening.reselection_count()
        );
    }

    drop(coarsening);
    listener.join().expect("listener thread panicked");

    Ok(())
}
