use std::time::Duration;

use poise::serenity_prelude as serenity;

use crate::embed::build_paginated_embed;

pub const PAGINATION_TIMEOUT_SECS: u64 = 60 * 3;

/// Number of pages needed for `total_items`; never less than one.
pub fn total_pages(total_items: usize, per_page: usize) -> usize {
    let per_page = per_page.max(1);
    total_items.div_ceil(per_page).max(1)
}

/// Half-open `[start, end)` index range of a 1-based page.
pub fn page_window(total_items: usize, per_page: usize, page: usize) -> (usize, usize) {
    let per_page = per_page.max(1);
    let page = page.max(1);
    let start = (page - 1).saturating_mul(per_page).min(total_items);
    let end = (start + per_page).min(total_items);
    (start, end)
}

/// Pre-rendered pages sharing one title, color and footer note.
pub struct PageDeck<'a> {
    pub title: &'a str,
    pub pages: &'a [String],
    pub color: u32,
    pub footer_note: Option<&'a str>,
}

struct ButtonIds {
    prefix: String,
    prev: String,
    jump: String,
    next: String,
    jump_modal: String,
    jump_input: String,
}

impl ButtonIds {
    fn new(ctx_id: u64) -> Self {
        let prefix = ctx_id.to_string();
        Self {
            prev: format!("{}_prev", prefix),
            jump: format!("{}_jump", prefix),
            next: format!("{}_next", prefix),
            jump_modal: format!("{}_jump_modal", prefix),
            jump_input: format!("{}_jump_input", prefix),
            prefix,
        }
    }
}

impl PageDeck<'_> {
    fn embed(&self, index: usize) -> serenity::CreateEmbed {
        build_paginated_embed(
            self.title,
            self.pages[index].clone(),
            self.color,
            index + 1,
            self.pages.len(),
            self.footer_note,
        )
    }

    fn components(&self, ids: &ButtonIds, index: usize) -> Vec<serenity::CreateActionRow> {
        let is_first_page = index == 0;
        let is_last_page = index + 1 >= self.pages.len();

        vec![serenity::CreateActionRow::Buttons(vec![
            serenity::CreateButton::new(&ids.prev)
                .label("Prev")
                .disabled(is_first_page)
                .style(serenity::ButtonStyle::Secondary),
            serenity::CreateButton::new(&ids.jump)
                .label("Jump")
                .style(serenity::ButtonStyle::Secondary),
            serenity::CreateButton::new(&ids.next)
                .label("Next")
                .disabled(is_last_page)
                .style(serenity::ButtonStyle::Secondary),
        ])]
    }

    fn update(&self, ids: &ButtonIds, index: usize) -> serenity::CreateInteractionResponse {
        serenity::CreateInteractionResponse::UpdateMessage(
            serenity::CreateInteractionResponseMessage::new()
                .embed(self.embed(index))
                .components(self.components(ids, index)),
        )
    }
}

/// Send `deck` starting at the 1-based `start_page`, with Prev/Jump/Next buttons
/// for the invoking user until the collector times out.
pub async fn paginate_embed_pages<U, E>(
    ctx: poise::Context<'_, U, E>,
    deck: PageDeck<'_>,
    start_page: usize,
) -> Result<(), serenity::Error>
where
    U: Send + Sync,
    E: Send + Sync,
{
    if deck.pages.is_empty() {
        return Ok(());
    }

    let total = deck.pages.len();
    let mut current = start_page.clamp(1, total) - 1;

    if total == 1 {
        ctx.send(poise::CreateReply::default().embed(deck.embed(current)))
            .await?;
        return Ok(());
    }

    let ids = ButtonIds::new(ctx.id());
    let reply = ctx
        .send(
            poise::CreateReply::default()
                .embed(deck.embed(current))
                .components(deck.components(&ids, current)),
        )
        .await?;

    let message = reply.message().await?;
    let message_id = message.id;
    let channel_id = message.channel_id;

    while let Some(press) = serenity::collector::ComponentInteractionCollector::new(ctx)
        .filter({
            let prefix = ids.prefix.clone();
            let author_id = ctx.author().id;
            move |interaction| {
                interaction.data.custom_id.starts_with(&prefix)
                    && interaction.user.id == author_id
                    && interaction.message.id == message_id
            }
        })
        .timeout(Duration::from_secs(PAGINATION_TIMEOUT_SECS))
        .await
    {
        let custom_id = press.data.custom_id.as_str();

        if custom_id == ids.next || custom_id == ids.prev {
            current = if custom_id == ids.next {
                (current + 1).min(total - 1)
            } else {
                current.saturating_sub(1)
            };

            press
                .create_response(ctx.http(), deck.update(&ids, current))
                .await?;
            continue;
        }

        if custom_id != ids.jump {
            continue;
        }

        press
            .create_response(
                ctx.http(),
                serenity::CreateInteractionResponse::Modal(
                    serenity::CreateModal::new(&ids.jump_modal, "Jump to Page").components(vec![
                        serenity::CreateActionRow::InputText(
                            serenity::CreateInputText::new(
                                serenity::InputTextStyle::Short,
                                "Page Number",
                                &ids.jump_input,
                            )
                            .placeholder(format!("1-{}", total))
                            .required(true),
                        ),
                    ]),
                ),
            )
            .await?;

        let Some(modal) = serenity::collector::ModalInteractionCollector::new(ctx)
            .author_id(ctx.author().id)
            .channel_id(ctx.channel_id())
            .custom_ids(vec![ids.jump_modal.clone()])
            .timeout(Duration::from_secs(PAGINATION_TIMEOUT_SECS))
            .await
        else {
            continue;
        };

        modal
            .create_response(ctx.http(), serenity::CreateInteractionResponse::Acknowledge)
            .await?;

        let submitted_page = modal
            .data
            .components
            .iter()
            .flat_map(|row| row.components.iter())
            .find_map(|component| match component {
                serenity::ActionRowComponent::InputText(input)
                    if input.custom_id == ids.jump_input =>
                {
                    input.value.clone()
                }
                _ => None,
            });

        if let Some(submitted_page) = submitted_page
            && let Ok(target_page) = submitted_page.trim().parse::<usize>()
            && (1..=total).contains(&target_page)
        {
            current = target_page - 1;

            channel_id
                .edit_message(
                    ctx.http(),
                    message_id,
                    serenity::EditMessage::new()
                        .embed(deck.embed(current))
                        .components(deck.components(&ids, current)),
                )
                .await?;
        }
    }

    // Drop the buttons once nobody can press them.
    let _ = channel_id
        .edit_message(
            ctx.http(),
            message_id,
            serenity::EditMessage::new()
                .embed(deck.embed(current))
                .components(Vec::new()),
        )
        .await;

    Ok(())
}
