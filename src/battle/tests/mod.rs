pub mod common;



#[cfg(test)]
mod test_move_resolution;

#[cfg(test)]
mod test_trainer_battle;
