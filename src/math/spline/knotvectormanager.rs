use std::rc::Rc;

use serde::Deserialize;

use crate::manager::manager::Manager;
use crate::manager::managererror::ManagerError;
use crate::math::spline::knotvector::KnotVector;

#[derive(Deserialize)]
struct KnotVectorJsonProp {
    knots: Vec<f64>
}

fn get_knot_vector_from_json(json_value: serde_json::Value) -> Result<Rc<KnotVector>, ManagerError> {
    let json_prop: KnotVectorJsonProp = ManagerError::from_json_or_json_parse_error(json_value)?;
    let knot_vector = KnotVector::validated(json_prop.knots)?;
    Ok(Rc::new(knot_vector))
}

pub struct KnotVectorManager;

impl KnotVectorManager {
    pub fn new() -> Manager<Rc<KnotVector>> {
        Manager::new(get_knot_vector_from_json)
    }
}
