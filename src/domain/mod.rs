/// Domain layer: the project records read from the resource list
pub mod entities;
