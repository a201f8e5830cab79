/// Registers games with the hub and generates their launchers.
///
/// Usage in games/mod.rs:
/// ```ignore
/// register_games! {
///     tictactoe => {
///         screen: TicTacToeScreen,
///         id: "tictactoe",
///         name: "Tic Tac Toe",
///         description: "Two players, one keyboard"
///     }
/// }
/// ```
///
/// Each `$module` must expose `$screen::new()` returning a
/// [`Game`](crate::shell::game::Game).
#[macro_export]
macro_rules! register_games {
    (
        $(
            $module:ident => {
                screen: $screen:ident,
                id: $id:expr,
                name: $name:expr,
                description: $desc:expr
            }
        ),* $(,)?
    ) => {
        /// One launcher per registered game.
        mod launch {
            $(
                pub fn $module<'a>(
                    terminal: &'a mut ::ratatui::DefaultTerminal,
                    options: $crate::shell::engine::EngineOptions,
                ) -> ::std::pin::Pin<
                    Box<dyn ::std::future::Future<Output = ::anyhow::Result<()>> + 'a>,
                > {
                    Box::pin(async move {
                        use $crate::games::$module::$screen;
                        use $crate::shell::engine::Engine;

                        Engine::new($screen::new(), options).run(terminal).await
                    })
                }
            )*
        }

        /// Get all available games with their metadata and launchers
        pub fn get_all_games() -> Vec<GameRegistry> {
            vec![
                $(
                    GameRegistry {
                        info: GameInfo {
                            id: $id,
                            name: $name,
                            description: $desc,
                        },
                        launcher: launch::$module,
                    }
                ),*
            ]
        }

        /// Get a game by ID
        pub fn get_game(id: &str) -> Option<GameRegistry> {
            get_all_games().into_iter().find(|g| g.info.id == id)
        }
    };
}
