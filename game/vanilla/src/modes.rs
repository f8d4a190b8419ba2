pub mod team_deathmatch;
