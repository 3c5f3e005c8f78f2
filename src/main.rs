
use irspline::configuration::Configuration;

const JSON_FOLDER: &'static str = "json/";

fn main() {

    let mut config_path = JSON_FOLDER.to_owned();
    config_path.push_str("config.json");
    let config = Configuration::new();
    config.from_reader(&config_path).unwrap();
    let evaluator_name = "UniformTenYear";
    let evaluator = config.evaluator(evaluator_name).unwrap();
    println!("knot vector '{}', {} knots", evaluator_name, evaluator.knots().len());
    println!("time, basis(0,3), integral(0,3), derivative(0,3,order=1)");
    for step in 0..=8 {
        let time = step as f64 * 0.5;
        println!("{}, {}, {}, {}",
                 time,
                 evaluator.basis(0, 3, time),
                 evaluator.integral(0, 3, time),
                 evaluator.derivative(0, 3, time, 1));
    }
    println!("gamma(0, 1, 3) = {}", evaluator.gamma(0, 1.0, 3.0));
    println!("cross_integral(0, 1, 0, 4) = {}", evaluator.cross_integral(0, 1, 0.0, 4.0));
}
