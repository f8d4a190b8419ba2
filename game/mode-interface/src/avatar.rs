/// Avatar conditioning applied for the duration of a round
/// (mortality, ammo), implemented by the player rig layer.
pub trait AvatarConditioner {
    fn set_mortality(&mut self, mortal: bool);
    /// Back to whatever the rig's default is.
    fn reset_mortality(&mut self);
    fn set_ammo(&mut self, ammo: u32);
}
