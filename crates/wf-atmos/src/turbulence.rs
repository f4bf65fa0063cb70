/// Turbulence intensity estimated from roughness length, `TI = 1 / ln(h / z0)`.
pub fn estimate_turbulence_intensity(height: f64, roughness_length: f64) -> f64 {
    1.0 / (height / roughness_length).ln()
}
