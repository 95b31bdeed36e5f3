use bevy::app::AppExit;

fn main() -> AppExit {
    transport_match::run()
}
