use landing_rs::api::{PageController, PageControllerConfig};
use landing_rs::core::ElementRef;
use landing_rs::dom::{Dom, ElementSpec, MemoryDom};
use landing_rs::interaction::PlaybackState;

struct Page {
    dom: MemoryDom,
    videos: [ElementRef; 3],
    controls: [ElementRef; 3],
}

fn page() -> Page {
    let mut dom = MemoryDom::new();
    let body = dom.root();
    let mut videos = [ElementRef(0); 3];
    let mut controls = [ElementRef(0); 3];
    for (index, id) in ["demo", "tour", "story"].into_iter().enumerate() {
        let wrapper = dom.append(body, ElementSpec::new("div").class("video-wrapper"));
        let video = if index == 2 {
            // Controlled but missing the marker class.
            ElementSpec::new("video").id(id)
        } else {
            ElementSpec::new("video").id(id).class("video-element")
        };
        videos[index] = dom.append(wrapper, video);
        controls[index] = dom.append(
            wrapper,
            ElementSpec::new("div")
                .class("play-button-overlay")
                .attr("data-video", id),
        );
    }
    Page {
        dom,
        videos,
        controls,
    }
}

fn opacity(controller: &PageController<MemoryDom>, control: ElementRef) -> Option<String> {
    controller.dom().style(control, "opacity")
}

#[test]
fn controlled_videos_join_the_managed_set() {
    let page = page();
    let controller =
        PageController::new(page.dom, PageControllerConfig::default()).expect("controller init");

    let managed: Vec<ElementRef> = controller
        .bindings()
        .videos
        .iter()
        .map(|binding| binding.video)
        .collect();
    assert_eq!(managed, page.videos.to_vec());
    for (video, control) in page.videos.iter().zip(page.controls) {
        assert_eq!(
            controller
                .bindings()
                .video_binding(*video)
                .and_then(|binding| binding.control),
            Some(control)
        );
    }
}

#[test]
fn starting_a_video_pauses_every_other_one() {
    let page = page();
    let mut controller =
        PageController::new(page.dom, PageControllerConfig::default()).expect("controller init");

    assert_eq!(
        controller.on_video_control_click(page.controls[0]),
        Some(PlaybackState::Playing)
    );
    assert_eq!(opacity(&controller, page.controls[0]).as_deref(), Some("0"));

    assert_eq!(
        controller.on_video_control_click(page.controls[2]),
        Some(PlaybackState::Playing)
    );
    assert_eq!(controller.playing_videos(), vec![page.videos[2]]);
    assert!(controller.dom().is_media_paused(page.videos[0]));
    assert_eq!(opacity(&controller, page.controls[0]).as_deref(), Some("0.9"));
    assert_eq!(opacity(&controller, page.controls[2]).as_deref(), Some("0"));
}

#[test]
fn clicking_a_playing_video_pauses_it() {
    let page = page();
    let mut controller =
        PageController::new(page.dom, PageControllerConfig::default()).expect("controller init");

    controller.on_video_control_click(page.controls[1]);
    assert_eq!(
        controller.on_video_control_click(page.controls[1]),
        Some(PlaybackState::Paused)
    );
    assert!(controller.playing_videos().is_empty());
    assert_eq!(opacity(&controller, page.controls[1]).as_deref(), Some("0.9"));
    assert_eq!(controller.dom().play_calls(page.videos[1]), 1);
}

#[test]
fn rejected_playback_restores_the_control() {
    let page = page();
    let mut controller =
        PageController::new(page.dom, PageControllerConfig::default()).expect("controller init");
    controller
        .dom_mut()
        .fail_next_play(page.videos[0], "NotAllowedError");

    assert_eq!(
        controller.on_video_control_click(page.controls[0]),
        Some(PlaybackState::Paused)
    );
    assert_eq!(
        controller.playback_state(page.videos[0]),
        Some(PlaybackState::Paused)
    );
    assert_eq!(opacity(&controller, page.controls[0]).as_deref(), Some("0.9"));
}

#[test]
fn ended_and_external_pause_restore_the_control() {
    let page = page();
    let mut controller =
        PageController::new(page.dom, PageControllerConfig::default()).expect("controller init");

    controller.on_video_control_click(page.controls[0]);
    controller.dom_mut().pause_media(page.videos[0]);
    controller.on_video_ended(page.videos[0]);
    assert_eq!(opacity(&controller, page.controls[0]).as_deref(), Some("0.9"));

    controller.on_video_control_click(page.controls[1]);
    controller.dom_mut().pause_media(page.videos[1]);
    controller.on_video_paused(page.videos[1]);
    assert_eq!(opacity(&controller, page.controls[1]).as_deref(), Some("0.9"));
}

#[test]
fn unbound_control_is_ignored() {
    let page = page();
    let mut controller =
        PageController::new(page.dom, PageControllerConfig::default()).expect("controller init");

    assert_eq!(controller.on_video_control_click(page.videos[0]), None);
    assert_eq!(controller.dom().play_calls(page.videos[0]), 0);
}

#[test]
fn control_pointing_at_missing_video_is_not_bound() {
    let mut dom = MemoryDom::new();
    let body = dom.root();
    let control = dom.append(
        body,
        ElementSpec::new("div")
            .class("play-button-overlay")
            .attr("data-video", "ghost"),
    );
    let mut controller =
        PageController::new(dom, PageControllerConfig::default()).expect("controller init");

    assert!(controller.bindings().videos.is_empty());
    assert_eq!(controller.on_video_control_click(control), None);
}
