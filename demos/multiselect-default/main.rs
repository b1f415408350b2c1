//! Minimal multi-select demo: two items, arrow keys to move, space to
//! toggle, enter to submit and quit.

use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg, Program};
use multiselect_widgets::multiselect::{DefaultItem, Model as MultiSelect};

struct App {
    list: MultiSelect<DefaultItem>,
}

impl BubbleTeaModel for App {
    fn init() -> (Self, Option<Cmd>) {
        let items = vec![
            DefaultItem::new("Item 1", "item1").with_key("item1"),
            DefaultItem::new("Item 2", "item2").with_key("item2"),
        ];
        let list = MultiSelect::new(items).on_submit(|selected| {
            for item in selected {
                println!("selected: {}", item);
            }
        });
        (Self { list }, None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.list.update(msg)
    }

    fn view(&self) -> String {
        format!(
            "Pick your items:\n\n{}\n\n↑/↓ move · space toggle · enter submit",
            self.list.view()
        )
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let program = Program::<App>::builder().build()?;
    program.run().await?;
    Ok(())
}
