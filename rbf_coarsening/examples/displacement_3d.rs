use rbf_coarsening::{
    generate_random_points, AdaptiveCoarsening, Coarsener, CoarseningTestFunctions,
    NoCoarsening, config::CoarseningParams, interpolant_config::{Drift, InterpolantSettings},
    kernels::WendlandC2RbfKernel,
};
use std::sync::Arc;
use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Boundary points of a moving body and the interior mesh points to deform
    let boundary_points = generate_random_points(1500, 3, Some(42));
    let mesh_points = generate_random_points(3000, 3, Some(7));

    // Rotate the body by 5 degrees about the z axis and bend it slightly
    let rigid = CoarseningTestFunctions::rigid_rotation_3d(
        &boundary_points,
        5f64.to_radians(),
        [0.01, 0.0, 0.0],
    );
    let bump = CoarseningTestFunctions::narrow_bump(&boundary_points, &[0.5, 0.5, 0.5], 0.3);
    let displacement = faer::Mat::from_fn(boundary_points.nrows(), 3, |i, j| match j {
        2 => rigid[(i, j)] + 0.02 * bump[(i, 0)],
        _ => rigid[(i, j)],
    });

    // Compactly supported kernel with a linear drift, so rigid motion is exact
    let kernel = Arc::new(WendlandC2RbfKernel::new(1.5));
    let rbf_settings = InterpolantSettings::builder().drift(Drift::Linear).build();

    let params = CoarseningParams::builder().tolerance(1e-3).max_points(400).build();

    let start = Instant::now();
    let mut coarsening = AdaptiveCoarsening::new(params)?.rbf_settings(rbf_settings);
    coarsening.compute(kernel.clone(), boundary_points.clone(), mesh_points.clone())?;
    let coarse = coarsening.interpolate(&displacement)?;
    println!(
        "coarsened: {} of {} points, {:?}, {:?}",
        coarsening.selection().len(),
        boundary_points.nrows(),
        coarsening.status(),
        start.elapsed()
    );

    let start = Instant::now();
    let mut reference = NoCoarsening::new().rbf_settings(rbf_settings);
    reference.compute(kernel, boundary_points, mesh_points)?;
    let full = reference.interpolate(&displacement)?;
    println!("full interpolation: {:?}", start.elapsed());

    let max_diff = (0..full.nrows())
        .flat_map(|i| (0..3).map(move |j| (i, j)))
        .fold(0.0f64, |acc, (i, j)| acc.max((full[(i, j)] - coarse[(i, j)]).abs()));
    println!("max difference on the mesh: {:.3e}", max_diff);

    Ok(())
}
