use crate::books::domain::model::Category;
use crate::core::domain::Identifiable;

pub mod model;

pub(crate) trait Book: Identifiable {
    fn is_available(&self) -> bool;
    fn category(&self) -> &Category;
}
