use std::cell::{
    RefCell,
    RefMut
};
use std::fs::File;
use std::io::BufReader;
use std::rc::Rc;

use log::debug;
use serde::Deserialize;

use crate::manager::managererror::ManagerError;
use crate::manager::manager::{
    IManager,
    Manager
};
use crate::math::spline::knotvector::KnotVector;
use crate::math::spline::knotvectormanager::KnotVectorManager;
use crate::math::spline::splineevaluator::{
    SingleThreadedSplineEvaluator,
    SplineEvaluator
};


#[derive(Deserialize)]
struct ConfigurationJsonProp {
    knot_vectors: Vec<serde_json::Value>
}

pub struct Configuration {
    knot_vector_manager_cell: RefCell<Manager<Rc<KnotVector>>>
}


impl Configuration {
    pub fn new() -> Configuration {
        Configuration {
            knot_vector_manager_cell: RefCell::new(KnotVectorManager::new())
        }
    }

    pub fn knot_vector_manager(&self) -> RefMut<'_, Manager<Rc<KnotVector>>> {
        self.knot_vector_manager_cell.borrow_mut()
    }

    pub fn from_reader(&self, file_path: &str) -> Result<(), ManagerError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let json_prop: ConfigurationJsonProp = serde_json::from_reader(reader)?;
        let knot_vector_manager = self.knot_vector_manager_cell.borrow_mut();
        knot_vector_manager.insert_obj_from_json_vec(&json_prop.knot_vectors)?;
        debug!(
            "loaded {} knot vectors from {}",
            json_prop.knot_vectors.len(),
            file_path
        );
        Ok(())
    }

    /// 以設定檔中的名字建出評價器。評價器獨占一份節點向量的 copy，
    /// 之後設定層的任何變動都不影響既有的評價器。
    pub fn evaluator(&self, name: &str) -> Result<SingleThreadedSplineEvaluator, ManagerError> {
        let knot_vector = self.knot_vector_manager().get(name)?;
        Ok(SplineEvaluator::new(knot_vector.as_ref().clone()))
    }
}
