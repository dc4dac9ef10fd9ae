mod option;
mod scalar;
mod string;
mod vec;
