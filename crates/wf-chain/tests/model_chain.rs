//! End-to-end model chain runs on serialized plants and weather tables.

use wf_chain::{
    ErrorKind, ModelChain, ModelChainConfig, PowerPlant, Quantity, RunStage, Series, WeatherTable,
    from_yaml_str,
};
use wf_curves::power_output::evaluate;
use wf_curves::{
    Curve, EfficiencyRegistry, SmoothingParams, StandardDeviationMethod, reduce_wind_speed,
    smooth_power_curve,
};

const T3000: &str = r#"
turbine_type: T3000
hub_height: 100.0
rotor_diameter: 90.0
nominal_power: 3000000.0
power_curve:
  wind_speed: [0.0, 3.0, 12.0, 25.0]
  value: [0.0, 0.0, 3000000.0, 3000000.0]
"#;

const WEATHER_YAML: &str = r#"
index:
  - 2010-01-01T00:00:00Z
  - 2010-01-01T01:00:00Z
columns:
  - quantity: wind_speed
    height: 10.0
    data: { values: [5.0, 6.5] }
  - quantity: wind_speed
    height: 8.0
    data: { values: [4.0, 5.0] }
  - quantity: temperature
    height: 2.0
    data: { values: [267.0, 268.0] }
  - quantity: pressure
    height: 0.0
    data: { values: [101125.0, 101000.0] }
  - quantity: roughness_length
    height: 0.0
    data: { values: [0.15, 0.15] }
"#;

fn turbine_plant() -> PowerPlant {
    serde_yaml::from_str(&format!("kind: turbine\n{T3000}")).unwrap()
}

fn t3000_curve() -> Curve {
    Curve::new(vec![0.0, 3.0, 12.0, 25.0], vec![0.0, 0.0, 3.0e6, 3.0e6]).unwrap()
}

fn farm_plant(efficiency: &str) -> PowerPlant {
    let turbine = T3000.replace('\n', "\n      ");
    serde_yaml::from_str(&format!(
        "kind: farm\nname: ridge\n{efficiency}\nwind_turbine_fleet:\n  - number_of_turbines: 3\n    wind_turbine:{turbine}\n"
    ))
    .unwrap()
}

fn weather() -> WeatherTable {
    serde_yaml::from_str(WEATHER_YAML).unwrap()
}

fn hub_weather(wind_speed: Vec<f64>) -> WeatherTable {
    WeatherTable::new()
        .with_column(Quantity::WindSpeed, 100.0, wind_speed)
        .unwrap()
}

fn assert_close(actual: f64, expected: f64) {
    let tol = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn turbine_hellman_run() {
    let config = ModelChainConfig {
        wind_speed_model: "hellman".into(),
        hellman_exp: Some(1.0 / 7.0),
        ..ModelChainConfig::default()
    };
    let chain = ModelChain::new(turbine_plant(), &config).unwrap();
    let out = chain.run(&weather()).unwrap();

    let factor = 10f64.powf(1.0 / 7.0);
    let values = out.power_output.values();
    assert_close(values[0], evaluate(&t3000_curve(), 5.0 * factor));
    assert_close(values[1], evaluate(&t3000_curve(), 6.5 * factor));
    assert_eq!(out.power_curve, Some(t3000_curve()));
}

#[test]
fn output_keeps_weather_index() {
    let chain = ModelChain::new(turbine_plant(), &ModelChainConfig::default()).unwrap();
    let weather = weather();
    let out = chain.run(&weather).unwrap();
    assert_eq!(out.power_output.index(), weather.index());
    assert_eq!(out.power_output.index().map(<[_]>::len), Some(2));
}

#[test]
fn height_interpolation_models() {
    let config = ModelChainConfig {
        wind_speed_model: "interpolation_extrapolation".into(),
        ..ModelChainConfig::default()
    };
    let chain = ModelChain::new(turbine_plant(), &config).unwrap();
    let v = chain.wind_speed_hub(&weather()).unwrap();
    assert_close(v.values()[0], 50.0);
    assert_close(v.values()[1], 74.0);

    let config = ModelChainConfig {
        wind_speed_model: "log_interpolation_extrapolation".into(),
        ..ModelChainConfig::default()
    };
    let chain = ModelChain::new(turbine_plant(), &config).unwrap();
    let v = chain.wind_speed_hub(&weather()).unwrap();
    assert!((v.values()[0] - 15.318_851_158_516_15).abs() < 1e-9);
    assert!((v.values()[1] - 21.978_276_737_774_227).abs() < 1e-9);
}

#[test]
fn temperature_gradient_to_hub() {
    let chain = ModelChain::new(turbine_plant(), &ModelChainConfig::default()).unwrap();
    let t = chain.temperature_hub(&weather()).unwrap();
    assert_close(t.values()[0], 267.0 - 0.0065 * 98.0);
}

#[test]
fn temperature_interpolation_between_heights() {
    let config = ModelChainConfig {
        temperature_model: "interpolation_extrapolation".into(),
        density_correction: true,
        ..ModelChainConfig::default()
    };
    let chain = ModelChain::new(turbine_plant(), &config).unwrap();

    // a single temperature column is not enough to interpolate
    let err = chain.run(&weather()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingData);
    assert!(err.to_string().contains("temperature"));

    let weather = weather()
        .with_column(Quantity::Temperature, 10.0, vec![266.0, 267.0])
        .unwrap();
    let t = chain.temperature_hub(&weather).unwrap();
    assert_close(t.values()[0], 254.75);
    assert_close(t.values()[1], 255.75);
    assert!(chain.run(&weather).is_ok());
}

#[test]
fn density_interpolation_between_heights() {
    let config = ModelChainConfig {
        density_model: "interpolation_extrapolation".into(),
        density_correction: true,
        ..ModelChainConfig::default()
    };
    let chain = ModelChain::new(turbine_plant(), &config).unwrap();

    let single = hub_weather(vec![8.0])
        .with_column(Quantity::Density, 10.0, vec![1.30])
        .unwrap();
    let err = chain.run(&single).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingData);
    assert!(err.to_string().contains("density"));

    let weather = single
        .with_column(Quantity::Density, 150.0, vec![1.28])
        .unwrap();
    let rho = chain.density_hub(&weather).unwrap();
    assert_close(rho.values()[0], 1.30 - 0.02 * 90.0 / 140.0);

    let out = chain.run(&weather).unwrap();
    assert!(out.stages.contains(&RunStage::DensityResolved));
    assert!(out.power_output.values()[0] > evaluate(&t3000_curve(), 8.0));
}

#[test]
fn obstacle_height_shifts_logarithmic_profile() {
    let config = ModelChainConfig {
        obstacle_height: 12.0,
        ..ModelChainConfig::default()
    };
    let chain = ModelChain::new(turbine_plant(), &config).unwrap();
    let v = chain.wind_speed_hub(&weather()).unwrap();
    let d: f64 = 0.7 * 12.0;
    let expected = 5.0 * ((100.0 - d) / 0.15).ln() / ((10.0 - d) / 0.15).ln();
    assert_close(v.values()[0], expected);
    // displacement raises the extrapolated wind speed
    assert!(v.values()[0] > 7.741_365_227_194_031);

    // 0.7 * 15 m lies above the 10 m measurement
    let config = ModelChainConfig {
        obstacle_height: 15.0,
        ..ModelChainConfig::default()
    };
    let chain = ModelChain::new(turbine_plant(), &config).unwrap();
    let err = chain.run(&weather()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Domain);
}

#[test]
fn farm_turbine_level_staffell_pfenninger_smoothing() {
    let config = ModelChainConfig {
        smoothing: true,
        smoothing_order: "turbine_power_curves".into(),
        standard_deviation_method: "Staffell_Pfenninger".into(),
        wake_losses_model: None,
        ..ModelChainConfig::default()
    };
    let chain = ModelChain::new(farm_plant(""), &config).unwrap();
    // no turbulence data needed for this method
    let out = chain.run(&hub_weather(vec![2.5, 12.0])).unwrap();

    let params = SmoothingParams {
        standard_deviation_method: StandardDeviationMethod::StaffellPfenninger,
        ..SmoothingParams::default()
    };
    let smoothed = smooth_power_curve(&t3000_curve(), &params, None).unwrap();
    let farm_curve = out.power_curve.unwrap();
    assert_eq!(farm_curve.wind_speeds(), smoothed.wind_speeds());
    for (farm, turbine) in farm_curve.values().iter().zip(smoothed.values()) {
        assert_close(*farm, 3.0 * turbine);
    }

    let values = out.power_output.values();
    assert!(values[0] > 0.0);
    assert_close(values[0], evaluate(&farm_curve, 2.5));
    assert!(values[1] < 9.0e6);
}

#[test]
fn coefficient_model_ignores_density_correction() {
    let plant: PowerPlant = serde_yaml::from_str(
        r#"
kind: turbine
hub_height: 100.0
rotor_diameter: 80.0
power_coefficient_curve:
  wind_speed: [0.0, 30.0]
  value: [0.4, 0.4]
"#,
    )
    .unwrap();
    let base = ModelChainConfig {
        power_output_model: "power_coefficient_curve".into(),
        ..ModelChainConfig::default()
    };
    let corrected = ModelChainConfig {
        density_correction: true,
        ..base.clone()
    };
    let plain = ModelChain::new(plant.clone(), &base).unwrap().run(&weather()).unwrap();
    let out = ModelChain::new(plant, &corrected).unwrap().run(&weather()).unwrap();
    assert_eq!(out.power_output, plain.power_output);
}

#[test]
fn density_correction_raises_output_in_dense_air() {
    let plain = ModelChain::new(turbine_plant(), &ModelChainConfig::default())
        .unwrap()
        .run(&weather())
        .unwrap();
    let config = ModelChainConfig {
        density_correction: true,
        ..ModelChainConfig::default()
    };
    let corrected = ModelChain::new(turbine_plant(), &config)
        .unwrap()
        .run(&weather())
        .unwrap();
    assert!(corrected.stages.contains(&RunStage::DensityResolved));
    for (c, p) in corrected.power_output.iter().zip(plain.power_output.iter()) {
        assert!(c > p, "corrected {c} should exceed {p}");
    }
}

#[test]
fn power_coefficient_run() {
    let plant: PowerPlant = serde_yaml::from_str(
        r#"
kind: turbine
hub_height: 100.0
rotor_diameter: 80.0
power_coefficient_curve:
  wind_speed: [0.0, 30.0]
  value: [0.4, 0.4]
"#,
    )
    .unwrap();
    let config = ModelChainConfig {
        power_output_model: "power_coefficient_curve".into(),
        density_model: "ideal_gas".into(),
        ..ModelChainConfig::default()
    };
    let chain = ModelChain::new(plant, &config).unwrap();
    let weather = weather()
        .with_column(Quantity::WindSpeed, 100.0, vec![8.0, 9.0])
        .unwrap();
    let out = chain.run(&weather).unwrap();

    let t_hub = 267.0 - 0.0065 * 98.0;
    let rho = (101_125.0 / 100.0 - 100.0 / 8.0) * 100.0 / (287.058 * t_hub);
    let expected = rho / 2.0 * std::f64::consts::PI * 40.0 * 40.0 * 8f64.powi(3) * 0.4;
    assert!((out.power_output.values()[0] - expected).abs() < 1e-6 * expected);
    assert_eq!(out.power_curve, None);
    assert!(out.stages.contains(&RunStage::DensityResolved));
}

#[test]
fn farm_with_dena_mean_wake_losses() {
    let chain = ModelChain::new(farm_plant(""), &ModelChainConfig::default()).unwrap();
    let out = chain.run(&hub_weather(vec![8.0, 20.0])).unwrap();

    let dena = EfficiencyRegistry::builtin();
    let reduced = reduce_wind_speed(&Series::scalar(8.0), dena.get("dena_mean").unwrap());
    let expected = 3.0 * evaluate(&t3000_curve(), reduced.values()[0]);
    let values = out.power_output.values();
    assert!((values[0] - expected).abs() < 1e-3);
    assert!(values[0] < 3.0 * evaluate(&t3000_curve(), 8.0));
    assert!((values[1] - 9.0e6).abs() < 1e-3);
}

#[test]
fn farm_efficiency_and_cut_out() {
    let config = ModelChainConfig {
        wake_losses_model: Some("wind_farm_efficiency".into()),
        ..ModelChainConfig::default()
    };
    let chain = ModelChain::new(farm_plant("efficiency: 0.9"), &config).unwrap();
    let out = chain.run(&hub_weather(vec![12.0, 30.0])).unwrap();
    let values = out.power_output.values();
    assert!((values[0] - 8.1e6).abs() < 1e-3);
    // beyond the zero padding behind the last curve point
    assert_eq!(values[1], 0.0);
}

#[test]
fn farm_efficiency_required_when_selected() {
    let config = ModelChainConfig {
        wake_losses_model: Some("wind_farm_efficiency".into()),
        ..ModelChainConfig::default()
    };
    let chain = ModelChain::new(farm_plant(""), &config).unwrap();
    let err = chain.run(&hub_weather(vec![12.0])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingData);
}

#[test]
fn cluster_run() {
    let cluster: PowerPlant = serde_yaml::from_str(
        r#"
kind: cluster
wind_farms:
  - name: north
    efficiency: 0.9
    wind_turbine_fleet:
      - wind_turbine:
          hub_height: 100.0
          nominal_power: 3000000.0
          power_curve:
            wind_speed: [0.0, 3.0, 12.0, 25.0]
            value: [0.0, 0.0, 3000000.0, 3000000.0]
        number_of_turbines: 2
  - name: south
    efficiency:
      wind_speed: [0.0, 10.0, 25.0]
      value: [1.0, 0.8, 0.9]
    wind_turbine_fleet:
      - wind_turbine:
          hub_height: 80.0
          nominal_power: 2000000.0
          power_curve:
            wind_speed: [0.0, 4.0, 13.0, 25.0]
            value: [0.0, 0.0, 2000000.0, 2000000.0]
        total_capacity: 6000000.0
"#,
    )
    .unwrap();
    // Constant wind speed over height, so any hub height sees 20 m/s.
    let weather = WeatherTable::new()
        .with_column(Quantity::WindSpeed, 10.0, vec![20.0])
        .unwrap()
        .with_column(Quantity::WindSpeed, 50.0, vec![20.0])
        .unwrap();

    let base = ModelChainConfig {
        wind_speed_model: "interpolation_extrapolation".into(),
        wake_losses_model: None,
        ..ModelChainConfig::default()
    };
    let out = ModelChain::new(cluster.clone(), &base)
        .unwrap()
        .run(&weather)
        .unwrap();
    assert!((out.power_output.values()[0] - 12.0e6).abs() < 1e-3);

    let config = ModelChainConfig {
        wake_losses_model: Some("wind_farm_efficiency".into()),
        ..base
    };
    let out = ModelChain::new(cluster, &config).unwrap().run(&weather).unwrap();
    assert!((out.power_output.values()[0] - 10.6e6).abs() < 1e-3);
}

#[test]
fn farm_smoothing_needs_turbulence() {
    let config = ModelChainConfig {
        smoothing: true,
        wake_losses_model: None,
        ..ModelChainConfig::default()
    };
    let chain = ModelChain::new(farm_plant(""), &config).unwrap();
    let err = chain.run(&hub_weather(vec![8.0])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingData);

    let weather = hub_weather(vec![2.5])
        .with_column(Quantity::RoughnessLength, 0.0, vec![0.15])
        .unwrap();
    let out = chain.run(&weather).unwrap();
    // smoothing spreads power below the cut-in wind speed
    assert!(out.power_output.values()[0] > 0.0);
}

#[test]
fn nan_wind_speed_propagates() {
    let chain = ModelChain::new(turbine_plant(), &ModelChainConfig::default()).unwrap();
    let out = chain.run(&hub_weather(vec![f64::NAN, 12.0])).unwrap();
    assert!(out.power_output.values()[0].is_nan());
    assert_eq!(out.power_output.values()[1], 3.0e6);
}

#[test]
fn missing_pressure_for_density() {
    let config = ModelChainConfig {
        density_correction: true,
        ..ModelChainConfig::default()
    };
    let chain = ModelChain::new(turbine_plant(), &config).unwrap();
    let err = chain.run(&hub_weather(vec![8.0])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingData);
    assert!(err.to_string().contains("pressure"));
}

#[test]
fn config_from_yaml() {
    let config = from_yaml_str(
        r#"
wind_speed_model: hellman
hellman_exp: 0.2
wake_losses_model: dena_worst
"#,
    )
    .unwrap();
    let err = ModelChain::new(farm_plant(""), &config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);

    let config = ModelChainConfig {
        wake_losses_model: None,
        ..config
    };
    let chain = ModelChain::new(turbine_plant(), &config).unwrap();
    let out = chain.run(&weather()).unwrap();
    let expected = evaluate(&t3000_curve(), 5.0 * 10f64.powf(0.2));
    assert_close(out.power_output.values()[0], expected);
}
